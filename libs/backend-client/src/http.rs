//! Thin HTTP client wrapper that records a tracing span per outgoing
//! request and the response status on completion.

use tracing::Level;

#[derive(Clone, Default)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let url = req.url().clone();
        let method = req.method().clone();

        let span = tracing::span!(
            Level::DEBUG, "outgoing_http",
            http.method = %method,
            http.url = %url,
            http.status_code = tracing::field::Empty,
            error = tracing::field::Empty,
        );
        let _g = span.enter();

        let response = self.inner.execute(req).await?;

        span.record("http.status_code", response.status().as_u16());
        if response.status().is_client_error() || response.status().is_server_error() {
            span.record("error", true);
        }

        Ok(response)
    }

    /// Create a request builder on the underlying client.
    pub fn request(&self, method: reqwest::Method, url: reqwest::Url) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn executes_built_requests() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(200).body("ok");
        });

        let client = TracedClient::default();
        let url = reqwest::Url::parse(&format!("{}/ping", server.base_url())).unwrap();
        let req = client.request(reqwest::Method::GET, url).build().unwrap();
        let resp = client.execute(req).await.unwrap();

        assert!(resp.status().is_success());
        m.assert();
    }
}
