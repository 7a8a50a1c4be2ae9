use serde::Deserialize;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::error::{error_from_response, StoreError};
use crate::http::TracedClient;
use crate::session::Session;

/// Client for the backend's auth endpoints (password grant).
#[derive(Clone)]
pub struct AuthClient {
    http: TracedClient,
    base: Url,
    anon_key: String,
}

/// Result of a sign-up: the account exists, but depending on project
/// settings (email confirmation) a session may not be issued yet.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub user_id: Uuid,
    pub session: Option<Session>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: Uuid,
}

#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
    // Older gateway versions nest the user under "session".
    #[serde(default)]
    session: Option<Box<TokenEnvelope>>,
}

#[derive(Deserialize)]
struct TokenEnvelope {
    access_token: String,
    user: AuthUser,
}

impl AuthClient {
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
        })
    }

    #[instrument(name = "auth.sign_in", skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        validate_credentials(email, password)?;

        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let req = self
            .http
            .request(reqwest::Method::POST, url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let token: TokenResponse = resp.json().await?;
        Ok(Session {
            user_id: token.user.id,
            access_token: token.access_token,
        })
    }

    #[instrument(name = "auth.sign_up", skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp, StoreError> {
        validate_credentials(email, password)?;

        let req = self
            .http
            .request(reqwest::Method::POST, self.endpoint("signup")?)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: SignUpResponse = resp.json().await?;

        if let Some(envelope) = body.session {
            return Ok(SignUp {
                user_id: envelope.user.id,
                session: Some(Session {
                    user_id: envelope.user.id,
                    access_token: envelope.access_token,
                }),
            });
        }

        let user_id = body
            .user
            .map(|u| u.id)
            .ok_or_else(|| StoreError::remote(200, "No user id returned after sign-up"))?;
        let session = body.access_token.map(|access_token| Session {
            user_id,
            access_token,
        });
        Ok(SignUp { user_id, session })
    }

    #[instrument(name = "auth.update_password", skip_all)]
    pub async fn update_password(
        &self,
        session: &Session,
        new_password: &str,
    ) -> Result<(), StoreError> {
        if new_password.trim().is_empty() {
            return Err(StoreError::validation("Password must not be empty"));
        }

        let req = self
            .http
            .request(reqwest::Method::PUT, self.endpoint("user")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    #[instrument(name = "auth.sign_out", skip_all)]
    pub async fn sign_out(&self, session: &Session) -> Result<(), StoreError> {
        let req = self
            .http
            .request(reqwest::Method::POST, self.endpoint("logout")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    fn endpoint(&self, name: &str) -> Result<Url, StoreError> {
        self.base
            .join(&format!("auth/v1/{name}"))
            .map_err(|e| StoreError::validation(format!("Invalid auth endpoint: {e}")))
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), StoreError> {
    if email.trim().is_empty() {
        return Err(StoreError::validation("Email must not be empty"));
    }
    if password.trim().is_empty() {
        return Err(StoreError::validation("Password must not be empty"));
    }
    Ok(())
}
