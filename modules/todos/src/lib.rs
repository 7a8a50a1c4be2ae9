//! To-dos: the `todo_items` collection and its completion filter.

pub mod model;
pub mod service;

pub use model::{NewTodo, StatusFilter, TodoItem, TodoPatch};
pub use service::TodoService;
