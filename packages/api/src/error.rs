//! Error taxonomy shared by the request client, the controllers and the live listener.

use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A call that needs credentials was made while signed out. Nothing was sent.
    #[error("not signed in")]
    Unauthenticated,

    /// The access token was rejected and the refresh protocol failed; the session is gone.
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// The backend answered with a non-success status.
    #[error("{message} (status {status})")]
    Request { status: u16, message: String },

    /// The request never produced a response (offline or DNS failure).
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("live channel error: {0}")]
    Live(String),
}

impl ClientError {
    /// HTTP status for [`ClientError::Request`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to go back to the login view.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthenticated | ClientError::SessionExpired
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(ClientError::Unauthenticated.requires_login());
        assert!(ClientError::SessionExpired.requires_login());
        let forbidden = ClientError::Request {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(!forbidden.requires_login());
        assert_eq!(forbidden.status(), Some(403));
        assert_eq!(forbidden.to_string(), "Forbidden (status 403)");
    }
}
