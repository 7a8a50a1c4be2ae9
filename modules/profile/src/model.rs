use backend_client::CollectionRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile row; its id equals the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl CollectionRecord for Profile {
    const TABLE: &'static str = "profiles";
    // Profiles are keyed by the user id itself.
    const OWNER_COLUMN: &'static str = "id";
    type New = NewProfile;
    type Patch = ProfilePatch;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Per-collection record counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub notes: u64,
    pub tasks: u64,
    pub todos: u64,
}

/// Initials for the dashboard greeting: first letters of the first two
/// name parts, uppercased.
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_the_first_two_parts() {
        assert_eq!(initials("Amira El-Sayed"), "AE");
        assert_eq!(initials("  jo   anne   doe "), "JA");
        assert_eq!(initials("Plato"), "P");
        assert_eq!(initials(""), "");
    }
}
