use backend_client::{RemoteCollection, Session, StorageBucket, StoreError, TracedClient};
use notes::Note;
use planner::PlannerTask;
use todos::TodoItem;
use tracing::instrument;

use crate::model::{DashboardCounts, NewProfile, Profile, ProfilePatch};

/// Profile row plus the dashboard's per-collection counts and the avatar
/// upload flow.
#[derive(Clone)]
pub struct ProfileService {
    profiles: RemoteCollection<Profile>,
    notes: RemoteCollection<Note>,
    tasks: RemoteCollection<PlannerTask>,
    todos: RemoteCollection<TodoItem>,
    avatars: StorageBucket,
}

impl ProfileService {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: &str,
        avatar_bucket: &str,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            profiles: RemoteCollection::new(http.clone(), base_url, anon_key)?,
            notes: RemoteCollection::new(http.clone(), base_url, anon_key)?,
            tasks: RemoteCollection::new(http.clone(), base_url, anon_key)?,
            todos: RemoteCollection::new(http.clone(), base_url, anon_key)?,
            avatars: StorageBucket::new(http, base_url, anon_key, avatar_bucket)?,
        })
    }

    /// The signed-in user's profile row.
    #[instrument(name = "profile.fetch", skip_all)]
    pub async fn fetch(&self, session: &Session) -> Result<Profile, StoreError> {
        let mut rows = self.profiles.list_all(session).await?;
        rows.pop()
            .ok_or_else(|| StoreError::remote(404, "Profile not found"))
    }

    /// Create the profile row right after registration.
    #[instrument(name = "profile.create", skip(self, session), fields(full_name = %full_name))]
    pub async fn create(
        &self,
        session: &Session,
        full_name: &str,
        email: &str,
    ) -> Result<Profile, StoreError> {
        let new = NewProfile {
            id: session.user_id,
            full_name: full_name.trim().to_string(),
            email: email.to_string(),
        };
        self.profiles.insert(session, &new).await
    }

    #[instrument(name = "profile.update_full_name", skip_all)]
    pub async fn update_full_name(
        &self,
        session: &Session,
        full_name: &str,
    ) -> Result<(), StoreError> {
        if full_name.trim().is_empty() {
            return Err(StoreError::validation("Name must not be empty"));
        }
        let patch = ProfilePatch {
            full_name: Some(full_name.trim().to_string()),
            ..ProfilePatch::default()
        };
        self.profiles.update(session, session.user_id, &patch).await
    }

    /// Upload a JPEG avatar (overwriting any previous one) and store its
    /// public URL on the profile. Returns that URL.
    #[instrument(name = "profile.set_avatar", skip(self, session, jpeg))]
    pub async fn set_avatar(&self, session: &Session, jpeg: Vec<u8>) -> Result<String, StoreError> {
        let object_path = format!("avatars/{}.jpg", session.user_id);
        let url = self.avatars.upload_jpeg(session, &object_path, jpeg).await?;

        let patch = ProfilePatch {
            avatar_url: Some(url.clone()),
            ..ProfilePatch::default()
        };
        self.profiles.update(session, session.user_id, &patch).await?;
        Ok(url)
    }

    /// Record counts for the dashboard cards.
    #[instrument(name = "profile.dashboard_counts", skip_all)]
    pub async fn dashboard_counts(&self, session: &Session) -> Result<DashboardCounts, StoreError> {
        let notes = self.notes.count(session).await?;
        let tasks = self.tasks.count(session).await?;
        let todos = self.todos.count(session).await?;
        Ok(DashboardCounts {
            notes,
            tasks,
            todos,
        })
    }
}
