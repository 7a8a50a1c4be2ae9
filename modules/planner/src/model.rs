use backend_client::CollectionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a planner task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A scheduled planner task (class, reminder, study session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerTask {
    pub id: Uuid,
    pub title: String,
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub recurring: Recurrence,
    pub user_id: Uuid,
}

/// Full task payload; the same shape is used for insert and for edit
/// (the planner saves whole records, not field patches).
#[derive(Debug, Clone, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub recurring: Recurrence,
    pub user_id: Uuid,
}

impl CollectionRecord for PlannerTask {
    const TABLE: &'static str = "planner_tasks";
    type New = TaskPayload;
    type Patch = TaskPayload;

    fn id(&self) -> Uuid {
        self.id
    }
}
