//! Client for the CourseCorrect backend: auth sessions, per-user remote
//! collections (PostgREST conventions), and object storage.
//!
//! Every call takes an explicit [`Session`]; there is no ambient
//! authenticated identity. All errors are terminal per operation — no
//! retries, no backoff.

pub mod auth;
pub mod collection;
pub mod error;
pub mod http;
pub mod session;
pub mod storage;

pub use auth::{AuthClient, SignUp};
pub use collection::{CollectionRecord, RemoteCollection};
pub use error::{error_from_response, StoreError};
pub use http::TracedClient;
pub use session::{Session, SessionFile};
pub use storage::StorageBucket;
