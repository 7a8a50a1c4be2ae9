use backend_client::{RemoteCollection, Session, StoreError, TracedClient};
use listview::ListQuery;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::model::{parse_tags, NewNote, Note, NotePatch};

/// Notes over the `course_notes` collection.
///
/// Mutations do not patch any local state; callers re-list afterwards
/// (full-refresh contract).
#[derive(Clone)]
pub struct NotesService {
    collection: RemoteCollection<Note>,
}

impl NotesService {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            collection: RemoteCollection::new(http, base_url, anon_key)?,
        })
    }

    /// Fetch the user's notes and run the local filter-sort pipeline.
    #[instrument(name = "notes.list", skip(self, session, query))]
    pub async fn list(&self, session: &Session, query: &ListQuery) -> Result<Vec<Note>, StoreError> {
        let all = self.collection.list_all(session).await?;
        Ok(listview::apply(&all, query))
    }

    /// Create a note. Content is required; empty input is rejected before
    /// any network call.
    #[instrument(name = "notes.add", skip_all)]
    pub async fn add(
        &self,
        session: &Session,
        title: &str,
        content: &str,
        tags_input: &str,
    ) -> Result<Note, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::validation("Note content must not be empty"));
        }

        let new = NewNote {
            title: title.to_string(),
            content: content.to_string(),
            tags: parse_tags(tags_input),
            is_done: false,
            user_id: session.user_id,
        };
        let note = self.collection.insert(session, &new).await?;
        debug!(id = %note.id, "note created");
        Ok(note)
    }

    /// Flip the done flag of one note.
    #[instrument(name = "notes.toggle_done", skip(self, session, note), fields(id = %note.id))]
    pub async fn toggle_done(&self, session: &Session, note: &Note) -> Result<(), StoreError> {
        let patch = NotePatch {
            is_done: Some(!note.is_done),
            ..NotePatch::default()
        };
        self.collection.update(session, note.id, &patch).await
    }

    /// Edit title/content/tags of one note.
    #[instrument(name = "notes.edit", skip(self, session, patch), fields(id = %id))]
    pub async fn edit(&self, session: &Session, id: Uuid, patch: NotePatch) -> Result<(), StoreError> {
        if let Some(content) = &patch.content {
            if content.trim().is_empty() {
                return Err(StoreError::validation("Note content must not be empty"));
            }
        }
        self.collection.update(session, id, &patch).await
    }

    /// Irreversibly delete a note. Confirmation is the caller's concern.
    #[instrument(name = "notes.delete", skip(self, session), fields(id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), StoreError> {
        self.collection.delete(session, id).await
    }
}

/// Distinct tags across a snapshot, sorted, for the tag filter chips.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = notes.iter().flat_map(|n| n.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}
