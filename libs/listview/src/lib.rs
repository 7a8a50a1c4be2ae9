//! Pure client-side list machinery: the filter→tag→sort pipeline applied
//! to collection snapshots, and the per-screen fetch-state holder.

pub mod pipeline;
pub mod state;

pub use pipeline::{apply, ListItem, ListQuery, SortOrder};
pub use state::{FetchState, RequestToken, ScreenState};
