//! HTTP client for the hosted dictionary service.
//!
//! This module provides the `ApiClient` struct for talking to the remote
//! store: PostgREST-style data endpoints under `/rest/v1` and GoTrue-style
//! auth endpoints under `/auth/v1`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::auth::SessionData;
use crate::models::{
    Category, Neologism, NeologismDraft, NeologismPatch, NeologismRow, NewCategoryRow,
    NewNeologismRow,
};

use super::{ApiError, EntityService};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Select clause that joins the denormalized category name onto each
/// neologism row.
const NEOLOGISM_SELECT: &str = "*,category:categories(name)";

/// PostgREST media type that makes a query return a single JSON object
/// instead of a one-element array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Token response from the password-grant auth endpoint.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserIdentity,
}

impl AuthResponse {
    fn into_session_data(self) -> SessionData {
        let now = Utc::now();
        SessionData {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user.id,
            email: self.user.email.unwrap_or_default(),
            created_at: now,
            expires_at: now + Duration::seconds(self.expires_in),
        }
    }
}

/// The authenticated user as reported by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: Option<String>,
}

/// API client for the dictionary service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    anon_key: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given service URL and public API key.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token; subsequent requests go out anonymously.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            token: Some(token),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Standard headers: the public API key plus a bearer token: the user's
    /// access token when signed in, the anon key otherwise.
    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        let bearer = self.token.as_deref().unwrap_or(&self.anon_key);

        headers.insert(
            "apikey",
            header::HeaderValue::from_str(&self.anon_key)
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid api key header: {}", e)))?,
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", bearer))
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid auth header: {}", e)))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Read a response body and parse it as JSON.
    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", e, &text[..text.len().min(200)])))
    }

    /// GET a list endpoint and parse the JSON array.
    async fn get_list<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .client
            .get(self.rest_url(table))
            .headers(self.auth_headers()?)
            .query(query)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_json(response).await
    }

    /// Map a single-object response, translating PostgREST's "zero rows in
    /// object mode" status into NotFound.
    async fn check_single(
        response: reqwest::Response,
        id: &str,
    ) -> Result<reqwest::Response, ApiError> {
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Self::check_response(response).await
    }

    // ===== Auth =====

    /// Sign in with email and password, returning session data on success.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionData, ApiError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .headers(self.auth_headers()?)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = Self::parse_json(response).await?;

        debug!(user_id = %auth.user.id, "Signed in");
        Ok(auth.into_session_data())
    }

    /// Revoke the current token server-side. A no-op when not signed in.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Ok(());
        }

        let response = self
            .client
            .post(self.auth_url("logout"))
            .headers(self.auth_headers()?)
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// The identity behind the current token, or None when the token is
    /// absent, expired, or revoked.
    pub async fn current_user(&self) -> Result<Option<UserIdentity>, ApiError> {
        if self.token.is_none() {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.auth_url("user"))
            .headers(self.auth_headers()?)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let response = Self::check_response(response).await?;
        let user: UserIdentity = Self::parse_json(response).await?;
        Ok(Some(user))
    }
}

// ============================================================================
// EntityService implementation
// ============================================================================

#[async_trait]
impl EntityService for ApiClient {
    async fn list_neologisms(&self) -> Result<Vec<Neologism>, ApiError> {
        let rows: Vec<NeologismRow> = self
            .get_list(
                "neologisms",
                &[("select", NEOLOGISM_SELECT), ("order", "created_at.desc")],
            )
            .await?;

        debug!(count = rows.len(), "Neologisms fetched");
        Ok(rows.iter().map(|r| r.to_neologism()).collect())
    }

    async fn get_neologism(&self, id: &str) -> Result<Neologism, ApiError> {
        let id_filter = format!("eq.{}", id);
        let response = self
            .client
            .get(self.rest_url("neologisms"))
            .headers(self.auth_headers()?)
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[("select", NEOLOGISM_SELECT), ("id", id_filter.as_str())])
            .send()
            .await?;

        let response = Self::check_single(response, id).await?;
        let row: NeologismRow = Self::parse_json(response).await?;
        Ok(row.to_neologism())
    }

    async fn create_neologism(&self, draft: &NeologismDraft) -> Result<Neologism, ApiError> {
        // Resolve the creator first; inserts must carry the owning user id.
        let user = self.current_user().await?.ok_or(ApiError::Unauthenticated)?;
        let row = NewNeologismRow::from_draft(draft, &user.id);

        let response = self
            .client
            .post(self.rest_url("neologisms"))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[("select", NEOLOGISM_SELECT)])
            .json(&row)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let created: NeologismRow = Self::parse_json(response).await?;

        debug!(id = %created.id, name = %created.name, "Neologism created");
        Ok(created.to_neologism())
    }

    async fn update_neologism(
        &self,
        id: &str,
        patch: &NeologismPatch,
    ) -> Result<Neologism, ApiError> {
        let id_filter = format!("eq.{}", id);
        let response = self
            .client
            .patch(self.rest_url("neologisms"))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[("select", NEOLOGISM_SELECT), ("id", id_filter.as_str())])
            .json(patch)
            .send()
            .await?;

        let response = Self::check_single(response, id).await?;
        let updated: NeologismRow = Self::parse_json(response).await?;
        Ok(updated.to_neologism())
    }

    async fn delete_neologism(&self, id: &str) -> Result<(), ApiError> {
        let id_filter = format!("eq.{}", id);
        let response = self
            .client
            .delete(self.rest_url("neologisms"))
            .headers(self.auth_headers()?)
            .query(&[("id", id_filter.as_str())])
            .send()
            .await?;

        Self::check_response(response).await?;
        debug!(id = %id, "Neologism deleted");
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_list("categories", &[("select", "*"), ("order", "name.asc")])
            .await
    }

    async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        let response = self
            .client
            .post(self.rest_url("categories"))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(&NewCategoryRow { name })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("https://example.supabase.co/", "anon-key")
            .expect("Failed to build test client")
    }

    #[test]
    fn test_url_building() {
        let api = client();
        // Trailing slash on the base URL must not double up
        assert_eq!(
            api.rest_url("neologisms"),
            "https://example.supabase.co/rest/v1/neologisms"
        );
        assert_eq!(
            api.auth_url("token"),
            "https://example.supabase.co/auth/v1/token"
        );
    }

    #[test]
    fn test_auth_headers_fall_back_to_anon_key() {
        let api = client();
        let headers = api.auth_headers().unwrap();
        assert_eq!(headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer anon-key"
        );

        let signed_in = api.with_token("user-token".to_string());
        let headers = signed_in.auth_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer user-token"
        );
    }

    #[test]
    fn test_parse_auth_response() {
        let json = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-me",
            "user": {
                "id": "99999999-8888-7777-6666-555555555555",
                "email": "wordsmith@example.com"
            }
        }"#;

        let auth: AuthResponse = serde_json::from_str(json)
            .expect("Failed to parse auth test JSON");
        let session = auth.into_session_data();

        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.email, "wordsmith@example.com");
        assert_eq!(
            (session.expires_at - session.created_at).num_seconds(),
            3600
        );
    }
}
