use backend_client::{RemoteCollection, Session, StoreError, TracedClient};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::model::{PlannerTask, Recurrence, TaskPayload};

/// Planner tasks over the `planner_tasks` collection, listed in schedule
/// order (datetime ascending, ordered server-side).
#[derive(Clone)]
pub struct PlannerService {
    collection: RemoteCollection<PlannerTask>,
}

impl PlannerService {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            collection: RemoteCollection::new(http, base_url, anon_key)?
                .ordered_by("datetime", true),
        })
    }

    #[instrument(name = "planner.list", skip(self, session))]
    pub async fn list(&self, session: &Session) -> Result<Vec<PlannerTask>, StoreError> {
        self.collection.list_all(session).await
    }

    /// One save path for both creation and edit: insert when `editing` is
    /// None, otherwise replace the whole record.
    #[instrument(name = "planner.save", skip(self, session), fields(title = %title))]
    pub async fn save(
        &self,
        session: &Session,
        editing: Option<Uuid>,
        title: &str,
        datetime: DateTime<Utc>,
        recurring: Recurrence,
    ) -> Result<(), StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::validation("Task title must not be empty"));
        }

        let payload = TaskPayload {
            title: title.to_string(),
            datetime,
            recurring,
            user_id: session.user_id,
        };
        match editing {
            Some(id) => self.collection.update(session, id, &payload).await,
            None => self.collection.insert(session, &payload).await.map(|_| ()),
        }
    }

    #[instrument(name = "planner.delete", skip(self, session), fields(id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), StoreError> {
        self.collection.delete(session, id).await
    }
}
