use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure the client can surface to a user.
///
/// `Display` is always the single human-readable message that ends up in an
/// alert or an inline panel; callers never need to inspect the variant to
/// build that text.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network unreachable, or a non-success status whose body carried no
    /// structured `detail`.
    #[error("{message}")]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },

    /// Non-success status with a structured `detail` message.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// A success body that is not JSON or does not match the expected shape.
    #[error("Unexpected response from {method} {path}: {reason}")]
    Schema {
        method: &'static str,
        path: String,
        reason: String,
    },

    /// A required field or selection was missing; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// One or more of the initial loads failed.
    #[error("{message}")]
    Startup { failed: usize, message: String },
}

impl ClientError {
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport { status, .. } => *status,
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Schema { .. }
            | ClientError::Validation(_)
            | ClientError::Startup { .. } => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Transport { .. } => "TRANSPORT_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Schema { .. } => "SCHEMA_ERROR",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Startup { .. } => "STARTUP_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn log(&self) {
        match self {
            ClientError::Validation(msg) => {
                warn!(code = self.code(), message = %msg, "Precondition not met");
            }
            ClientError::Startup { failed, message } => {
                error!(code = self.code(), failed, message = %message, "Startup failed");
            }
            _ => {
                error!(
                    code = self.code(),
                    status = ?self.status_code().map(|s| s.as_u16()),
                    message = %self,
                    "Request failed"
                );
            }
        }
    }
}
