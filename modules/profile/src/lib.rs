//! Profile, avatar storage, and the dashboard's collection counts.

pub mod model;
pub mod service;

pub use model::{initials, DashboardCounts, NewProfile, Profile, ProfilePatch};
pub use service::ProfileService;
