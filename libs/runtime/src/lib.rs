//! Runtime support for the CourseCorrect client: layered configuration
//! loading and logging bootstrap.

pub mod config;
pub mod logging;

pub use config::{ApisConfig, AppConfig, BackendConfig, CliArgs, LoggingConfig};
