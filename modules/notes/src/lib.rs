//! Course notes: the `course_notes` collection plus its local list view.

pub mod model;
pub mod service;

pub use model::{parse_tags, NewNote, Note, NotePatch};
pub use service::{all_tags, NotesService};
