use backend_client::{RemoteCollection, Session, StoreError, TracedClient};
use listview::{ListQuery, SortOrder};
use tracing::instrument;
use uuid::Uuid;

use crate::model::{NewTodo, StatusFilter, TodoItem, TodoPatch};

/// To-dos over the `todo_items` collection.
#[derive(Clone)]
pub struct TodoService {
    collection: RemoteCollection<TodoItem>,
}

impl TodoService {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            collection: RemoteCollection::new(http, base_url, anon_key)?,
        })
    }

    /// Fetch, apply the completion filter, and sort by creation time.
    /// Filtering preserves the relative order of the snapshot.
    #[instrument(name = "todos.list", skip(self, session))]
    pub async fn list(
        &self,
        session: &Session,
        filter: StatusFilter,
        order: SortOrder,
    ) -> Result<Vec<TodoItem>, StoreError> {
        let all = self.collection.list_all(session).await?;
        let sorted = listview::apply(&all, &ListQuery::new().order(order));
        Ok(sorted.into_iter().filter(|t| filter.matches(t)).collect())
    }

    #[instrument(name = "todos.add", skip_all)]
    pub async fn add(&self, session: &Session, title: &str) -> Result<TodoItem, StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::validation("To-do title must not be empty"));
        }
        let new = NewTodo {
            title: title.to_string(),
            user_id: session.user_id,
        };
        self.collection.insert(session, &new).await
    }

    /// Flip the completed flag of one item.
    #[instrument(name = "todos.toggle", skip(self, session, item), fields(id = %item.id))]
    pub async fn toggle(&self, session: &Session, item: &TodoItem) -> Result<(), StoreError> {
        let patch = TodoPatch {
            completed: Some(!item.completed),
            ..TodoPatch::default()
        };
        self.collection.update(session, item.id, &patch).await
    }

    #[instrument(name = "todos.delete", skip(self, session), fields(id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), StoreError> {
        self.collection.delete(session, id).await
    }
}
