use backend_client::CollectionRecord;
use chrono::{DateTime, Utc};
use listview::ListItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course note owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Data for creating a note; the store assigns id and created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_done: bool,
    pub user_id: Uuid,
}

/// Partial update for a note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl CollectionRecord for Note {
    const TABLE: &'static str = "course_notes";
    type New = NewNote;
    type Patch = NotePatch;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl ListItem for Note {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parse comma-separated tag input; blanks are dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
