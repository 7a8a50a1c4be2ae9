//! Planner: scheduled tasks in the `planner_tasks` collection.

pub mod model;
pub mod service;

pub use model::{PlannerTask, Recurrence, TaskPayload};
pub use service::PlannerService;
