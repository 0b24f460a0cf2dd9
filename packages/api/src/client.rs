//! # Authenticated request client
//!
//! Every call to the backend goes through [`ApiClient::request`]. It owns the
//! [`SessionStore`] and applies one fixed policy:
//!
//! 1. A call marked [`Access::Authenticated`] without an access token fails with
//!    [`ClientError::Unauthenticated`] before anything is sent.
//! 2. The access token is attached as `Authorization: Bearer <token>`.
//! 3. A `401` on an authenticated call runs the refresh protocol **once**. On
//!    success the call is retried **once** with the new token; a second `401` is
//!    returned as an ordinary [`ClientError::Request`]. On failure the session is
//!    cleared and the call fails with [`ClientError::SessionExpired`].
//! 4. Any other non-success status becomes [`ClientError::Request`], carrying the
//!    backend's `error`/`message` field when the body has one.
//! 5. `204` and non-JSON bodies yield `None`; JSON bodies are decoded.
//!
//! Overlapping calls share one refresh. Refreshes are serialized, and a call whose
//! `401` was answered for a token that has since been replaced retries with the
//! current token instead of refreshing again.
//!
//! [`ApiClient::refresh`] is the refresh protocol on its own: it swaps the stored
//! tokens on success and leaves the session untouched on failure. Clearing the
//! session is the caller's job. A refresh that settles after the session was
//! cleared or replaced is discarded.

use std::sync::Arc;

use futures::lock::Mutex;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::{ApiConfig, KeyValueStore, SessionStore};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::routes;

/// Whether a call needs the bearer credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Public,
}

/// Error body written by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Body of a successful `POST /token/refresh`.
#[derive(Debug, Deserialize)]
struct RefreshedTokens {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    #[serde(default, rename = "refresh_token", alias = "refreshToken")]
    refresh_token: Option<String>,
}

/// HTTP client bound to one backend and one session. Cheap to clone.
pub struct ApiClient<S: KeyValueStore> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: KeyValueStore> {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore<S>,
    refreshing: Mutex<()>,
}

impl<S: KeyValueStore> Clone for ApiClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> ApiClient<S> {
    pub fn new(base_url: impl Into<String>, session: SessionStore<S>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(Inner {
                http: reqwest::Client::new(),
                base_url,
                session,
                refreshing: Mutex::new(()),
            }),
        }
    }

    pub fn from_config(config: &ApiConfig, session: SessionStore<S>) -> Self {
        Self::new(config.base_url.clone(), session)
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.inner.session
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.base_url, endpoint)
    }

    /// Issue a call and return its decoded JSON body, if any.
    pub async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        access: Access,
    ) -> Result<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        let token = match access {
            Access::Authenticated => Some(
                self.session()
                    .access_token()
                    .ok_or(ClientError::Unauthenticated)?,
            ),
            Access::Public => None,
        };

        let mut response = self
            .send(&method, endpoint, body, token.as_deref())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED && access == Access::Authenticated {
            let rejected = token.as_deref().unwrap_or_default();
            debug!(%method, endpoint, "access token rejected");
            let token = self.renew_access_token(rejected).await?;
            response = self.send(&method, endpoint, body, Some(&token)).await?;
        }

        read_response(response).await
    }

    /// `GET` a collection. A missing or `null` body is an empty collection.
    pub async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        match self
            .request(Method::GET, endpoint, None::<&()>, Access::Authenticated)
            .await?
        {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Return an access token newer than `rejected`, refreshing at most once
    /// across all calls that were rejected with it.
    async fn renew_access_token(&self, rejected: &str) -> Result<String> {
        let _refreshing = self.inner.refreshing.lock().await;

        match self.session().access_token() {
            // Another call already gave up on this session while we were in flight.
            None => return Err(ClientError::SessionExpired),
            Some(current) if current != rejected => return Ok(current),
            Some(_) => {}
        }

        if self.refresh_locked().await {
            return self
                .session()
                .access_token()
                .ok_or(ClientError::SessionExpired);
        }
        // Only end the session that was rejected, not one signed in meanwhile.
        if self.session().access_token().as_deref() == Some(rejected) {
            warn!("token refresh failed, clearing session");
            self.session().clear().await;
        }
        Err(ClientError::SessionExpired)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Returns `false` on any failure and leaves the session as it was.
    pub async fn refresh(&self) -> bool {
        let _refreshing = self.inner.refreshing.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> bool {
        let Some(session) = self.session().get() else {
            return false;
        };

        let response = match self
            .send(
                &Method::POST,
                routes::TOKEN_REFRESH,
                None::<&()>,
                Some(&session.refresh_token),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("token refresh request failed: {e}");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "token refresh rejected");
            return false;
        }

        let tokens: RefreshedTokens = match response.json().await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("token refresh returned an unreadable body: {e}");
                return false;
            }
        };

        if !self
            .session()
            .replace_tokens(&session.refresh_token, tokens.token, tokens.refresh_token)
            .await
        {
            debug!("session changed during token refresh, discarding new tokens");
            return false;
        }
        debug!("access token refreshed");
        true
    }

    /// Send one request with an optional bearer, without any retry policy.
    pub(crate) async fn send<B>(
        &self,
        method: &Method,
        endpoint: &str,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.inner.http.request(method.clone(), self.url(endpoint));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!(
            %method,
            endpoint,
            status = response.status().as_u16(),
            "request settled"
        );
        Ok(response)
    }
}

async fn read_response(response: Response) -> Result<Option<Value>> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return Err(ClientError::Request {
            status: status.as_u16(),
            message,
        });
    }

    if status == StatusCode::NO_CONTENT || !is_json {
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}
