use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::error::{error_from_response, StoreError};
use crate::http::TracedClient;
use crate::session::Session;

/// A record type stored in a per-user remote collection.
pub trait CollectionRecord: DeserializeOwned + Send + Sync {
    /// Remote table name.
    const TABLE: &'static str;
    /// Column holding the owning user id.
    const OWNER_COLUMN: &'static str = "user_id";

    /// Payload for creating a record. Must carry the owner id.
    type New: Serialize + Send + Sync;
    /// Payload for (possibly partial) updates.
    type Patch: Serialize + Send + Sync;

    fn id(&self) -> Uuid;
}

/// Generic client for one named per-user collection.
///
/// Mediates between a view and a remote table: list everything the user
/// owns, mutate a single record, and let the caller re-list. All calls
/// require an explicit [`Session`]; there is no ambient identity.
#[derive(Clone)]
pub struct RemoteCollection<R> {
    http: TracedClient,
    base: Url,
    anon_key: String,
    order: Option<String>,
    _record: PhantomData<R>,
}

impl<R: CollectionRecord> RemoteCollection<R> {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::validation(format!("Invalid backend URL: {e}")))?;
        Ok(Self {
            http,
            base,
            anon_key: anon_key.into(),
            order: None,
            _record: PhantomData,
        })
    }

    /// Ask the store to order listings server-side by `column`.
    pub fn ordered_by(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{dir}"));
        self
    }

    /// Fetch every record owned by the session's user.
    #[instrument(name = "collection.list_all", skip(self, session), fields(table = R::TABLE))]
    pub async fn list_all(&self, session: &Session) -> Result<Vec<R>, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair(R::OWNER_COLUMN, &format!("eq.{}", session.user_id));
        if let Some(order) = &self.order {
            url.query_pairs_mut().append_pair("order", order);
        }

        let req = self
            .http
            .request(reqwest::Method::GET, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let records: Vec<R> = resp.json().await?;
        debug!(count = records.len(), "listed collection");
        Ok(records)
    }

    /// Insert one record and return the stored representation (with the
    /// store-assigned id).
    #[instrument(name = "collection.insert", skip(self, session, new), fields(table = R::TABLE))]
    pub async fn insert(&self, session: &Session, new: &R::New) -> Result<R, StoreError> {
        let req = self
            .http
            .request(reqwest::Method::POST, self.table_url()?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .header("Prefer", "return=representation")
            .json(new)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        // The store answers inserts with a one-element array.
        let mut rows: Vec<R> = resp.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::remote(200, "Insert returned no representation"))
    }

    /// Apply a (possibly partial) update to one record.
    #[instrument(name = "collection.update", skip(self, session, patch), fields(table = R::TABLE, id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: &R::Patch,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let req = self
            .http
            .request(reqwest::Method::PATCH, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .json(patch)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// Irreversibly delete one record.
    #[instrument(name = "collection.delete", skip(self, session), fields(table = R::TABLE, id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let req = self
            .http
            .request(reqwest::Method::DELETE, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// Count the user's records without fetching them (exact count via the
    /// content-range header).
    #[instrument(name = "collection.count", skip(self, session), fields(table = R::TABLE))]
    pub async fn count(&self, session: &Session) -> Result<u64, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair(R::OWNER_COLUMN, &format!("eq.{}", session.user_id));

        let req = self
            .http
            .request(reqwest::Method::GET, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let range = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        parse_content_range_total(range)
            .ok_or_else(|| StoreError::remote(200, format!("Unparsable content-range '{range}'")))
    }

    fn table_url(&self) -> Result<Url, StoreError> {
        self.base
            .join(&format!("rest/v1/{}", R::TABLE))
            .map_err(|e| StoreError::validation(format!("Invalid table URL: {e}")))
    }
}

/// Total from a `content-range` value such as `0-0/42` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range_total("0-0/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
        assert_eq!(parse_content_range_total(""), None);
    }
}
