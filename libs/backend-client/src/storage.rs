use tracing::instrument;
use url::Url;

use crate::error::{error_from_response, StoreError};
use crate::http::TracedClient;
use crate::session::Session;

/// Client for one object-storage bucket (avatar images).
#[derive(Clone)]
pub struct StorageBucket {
    http: TracedClient,
    base: Url,
    anon_key: String,
    bucket: String,
}

impl StorageBucket {
    pub fn new(
        http: TracedClient,
        base_url: &str,
        anon_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::validation(format!("Invalid backend URL: {e}")))?;
        Ok(Self {
            http,
            base,
            anon_key: anon_key.into(),
            bucket: bucket.into(),
        })
    }

    /// Upload a JPEG blob, overwriting any existing object at `object_path`,
    /// and return the publicly resolvable URL.
    #[instrument(name = "storage.upload_jpeg", skip(self, session, bytes), fields(path = %object_path, bytes = bytes.len()))]
    pub async fn upload_jpeg(
        &self,
        session: &Session,
        object_path: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::validation("Image is empty"));
        }

        let url = self
            .base
            .join(&format!("storage/v1/object/{}/{object_path}", self.bucket))
            .map_err(|e| StoreError::validation(format!("Invalid object path: {e}")))?;

        let req = self
            .http
            .request(reqwest::Method::POST, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .header("content-type", "image/jpeg")
            .header("x-upsert", "true")
            .body(bytes)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        self.public_url(object_path)
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(&self, object_path: &str) -> Result<String, StoreError> {
        self.base
            .join(&format!(
                "storage/v1/object/public/{}/{object_path}",
                self.bucket
            ))
            .map(|u| u.to_string())
            .map_err(|e| StoreError::validation(format!("Invalid object path: {e}")))
    }
}
