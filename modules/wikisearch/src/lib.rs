//! Encyclopedia search: paginated full-text queries against the public
//! search API, opened in an external viewer by URL.

pub mod client;
pub mod page;

pub use client::WikiClient;
pub use page::{article_url, SearchHit, SearchPage, PAGE_SIZE};
