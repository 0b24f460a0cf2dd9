//! Account operations: login, registration, logout and account update.

use reqwest::Method;
use serde::Deserialize;
use store::{AccountUpdate, Credentials, KeyValueStore, Session, UserInfo};
use tracing::{info, warn};

use crate::client::{Access, ApiClient};
use crate::error::{ClientError, Result};
use crate::routes;

/// Body of a successful `POST /login`.
///
/// The backend either nests the user (`{accessToken, refreshToken, user: {id}}`) or
/// flattens it next to the tokens (`{id, email, token, refresh_token}`).
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    #[serde(rename = "refresh_token", alias = "refreshToken")]
    refresh_token: String,
    #[serde(default)]
    user: Option<UserInfo>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl LoginResponse {
    fn into_session(self, login_email: &str) -> Result<Session> {
        let (user_id, email) = match (self.user, self.id) {
            (Some(user), _) => (user.id, user.email.or(self.email)),
            (None, Some(id)) => (id, self.email),
            (None, None) => {
                return Err(ClientError::InvalidResponse(
                    "login response carried no user".into(),
                ))
            }
        };

        Ok(Session {
            access_token: self.token,
            refresh_token: self.refresh_token,
            user_id,
            user_email: email.or_else(|| Some(login_email.to_string())),
        })
    }
}

impl<S: KeyValueStore> ApiClient<S> {
    /// Sign in and persist the new session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = self
            .request(
                Method::POST,
                routes::LOGIN,
                Some(&Credentials { email, password }),
                Access::Public,
            )
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("empty login response".into()))?;

        let response: LoginResponse = serde_json::from_value(body)?;
        let session = response.into_session(email)?;
        self.session().set(session.clone()).await;
        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        self.request(
            Method::POST,
            routes::REGISTER,
            Some(&Credentials { email, password }),
            Access::Public,
        )
        .await?;
        info!(email, "account registered");
        Ok(())
    }

    /// Revoke the refresh token and drop the session.
    ///
    /// The backend call is best effort: the local session is cleared whatever it answers.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session().refresh_token() {
            match self
                .send(&Method::POST, routes::LOGOUT, None::<&()>, Some(&refresh_token))
                .await
            {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = response.status().as_u16(), "logout rejected by backend");
                }
                Ok(_) => {}
                Err(e) => warn!("logout request failed: {e}"),
            }
        }
        self.session().clear().await;
        info!("signed out");
    }

    /// Change the signed-in user's email and password.
    pub async fn update_account(&self, email: &str, password: &str) -> Result<UserInfo> {
        let body = self
            .request(
                Method::PUT,
                routes::ACCOUNT,
                Some(&AccountUpdate { email, password }),
                Access::Authenticated,
            )
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("empty account response".into()))?;
        let user: UserInfo = serde_json::from_value(body)?;

        if let Some(session) = self.session().get() {
            let email = user.email.clone().unwrap_or_else(|| email.to_string());
            self.session().set(session.with_email(email)).await;
        }
        Ok(user)
    }
}
