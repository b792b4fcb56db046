use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Error body returned by the farm backend on failed requests.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Parses a response body, returning the most specific human readable message.
    pub fn message_from_body(body: &str) -> Option<String> {
        let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Unauthorized: session expired, please login again")]
    Unauthorized,

    #[error("Forbidden: access denied, check permissions")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid form: {0}")]
    InvalidForm(#[from] ValidationErrors),

    #[error("Invalid token: {0}")]
    Token(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ClientConfigError),
}

/// What the caller should do with a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorAction {
    /// Session has been cleared; send the user back to login.
    #[strum(serialize = "relogin")]
    Relogin,
    /// Show a blocking access-denied alert.
    #[strum(serialize = "forbidden")]
    Forbidden,
    /// Show a generic failure and keep prior state.
    #[strum(serialize = "operation_failed")]
    OperationFailed,
}

impl ClientError {
    pub fn action(&self) -> ErrorAction {
        match self {
            ClientError::Unauthorized => ErrorAction::Relogin,
            ClientError::Forbidden => ErrorAction::Forbidden,
            _ => ErrorAction::OperationFailed,
        }
    }

    /// Builds the error for a non-success status. 401 and 403 get their own variants.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            _ => ClientError::Http {
                status,
                message: ErrorResponse::message_from_body(body),
            },
        }
    }

    /// Message suitable for an alert: the server message when there is one.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Http { status, .. } => {
                format!("Operation failed (HTTP {}). Check server.", status.as_u16())
            }
            ClientError::Network(_) => "Could not connect to server. Check network.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "").action(),
            ErrorAction::Relogin
        );
        assert_eq!(
            ClientError::from_status(StatusCode::FORBIDDEN, "").action(),
            ErrorAction::Forbidden
        );
        assert_eq!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "").action(),
            ErrorAction::OperationFailed
        );
        assert_eq!(
            ClientError::Validation("missing".into()).action(),
            ErrorAction::OperationFailed
        );
    }

    #[test]
    fn server_message_is_surfaced() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid Credentials"}"#,
        );
        assert_eq!(err.user_message(), "Invalid Credentials");

        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.user_message(), "Operation failed (HTTP 502). Check server.");
    }

    #[test]
    fn blank_message_falls_back_to_error_field() {
        assert_eq!(
            ErrorResponse::message_from_body(r#"{"message":"  ","error":"Bad Request"}"#),
            None
        );
        assert_eq!(
            ErrorResponse::message_from_body(r#"{"error":"Bad Request"}"#),
            Some("Bad Request".to_string())
        );
    }
}
