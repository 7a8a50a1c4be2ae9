use backend_client::CollectionRecord;
use chrono::{DateTime, Utc};
use listview::ListItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTodo {
    pub title: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl CollectionRecord for TodoItem {
    const TABLE: &'static str = "todo_items";
    type New = NewTodo;
    type Patch = TodoPatch;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl ListItem for TodoItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Completion filter of the to-do list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }
}
