use http::StatusCode;
use thiserror::Error;

use crate::notification::Notification;

/// The client's error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection refused, aborted).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401. The session has already been cleared.
    #[error("Unauthorized - Please login again")]
    Unauthorized,

    /// Any other non-success status.
    #[error("{message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The message extracted from the body, or a generic status message.
        message: String,
        /// The parsed error body, when it was valid JSON.
        payload: Option<sonic_rs::Value>,
    },

    /// Input rejected before it reached the network.
    #[error("{0}")]
    Validation(String),

    /// Login did not yield a usable session.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A success body that was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(#[from] sonic_rs::Error),

    /// The session storage could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` type that uses `ApiError` as the error type.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Builds a `Server` error from a status and an optional parsed body.
    ///
    /// The message is the first non-empty string among the body's `message`
    /// and `error` fields, falling back to a generic status message.
    pub fn from_status(status: StatusCode, payload: Option<sonic_rs::Value>) -> Self {
        use sonic_rs::JsonValueTrait;

        let message = payload
            .as_ref()
            .and_then(|body| {
                ["message", "error"].into_iter().find_map(|field| {
                    body.get(field)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        ApiError::Server {
            status: status.as_u16(),
            message,
            payload,
        }
    }

    /// The HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Server { status, .. } => StatusCode::from_u16(*status).ok(),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// The raw error payload returned by the backend, if any.
    pub fn payload(&self) -> Option<&sonic_rs::Value> {
        match self {
            ApiError::Server { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<&ApiError> for Notification {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(e) => {
                tracing::error!("Transport error: {}", e);
                Notification::error("Network error. Please check if the backend is running")
            }

            ApiError::Unauthorized => {
                tracing::warn!("Session rejected by backend");
                Notification::error(err.to_string())
            }

            ApiError::Server { status, message, .. } => {
                tracing::warn!(status = *status, "Backend error: {}", message);
                Notification::error(message.clone())
            }

            ApiError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                Notification::error(msg.clone())
            }

            ApiError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                Notification::error("Login failed. Please check your credentials.")
            }

            ApiError::Decode(e) => {
                tracing::error!("Decode error: {}", e);
                Notification::error("Unexpected response from server")
            }

            ApiError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                Notification::error("Could not access saved session")
            }

            ApiError::Io(e) => {
                tracing::error!("IO error: {}", e);
                Notification::error("Could not access saved session")
            }
        }
    }
}

impl From<ApiError> for Notification {
    fn from(err: ApiError) -> Self {
        Notification::from(&err)
    }
}
