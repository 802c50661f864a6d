//! Unified error type for the Greeter server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use greeter_session::SessionError;

use crate::templates::TemplateError;

/// Top-level error that wraps all crate-specific errors.
///
/// Handlers return `Result<_, GreeterError>`; the `IntoResponse` impl
/// decides the status code. Validation problems are the client's fault
/// (4xx). Everything else is an infrastructure failure (5xx) and is
/// logged. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum GreeterError {
    /// A session-level error (invalid display name).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A template failed to load or render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Binding or serving the listener failed.
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GreeterError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GreeterError::Session(SessionError::InvalidName(_)) => {
                StatusCode::BAD_REQUEST
            }
            GreeterError::Template(_) | GreeterError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GreeterError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            (status, "Internal Server Error").into_response()
        } else {
            (status, self.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_session_error_is_bad_request() {
        let err: GreeterError = SessionError::InvalidName("x".into()).into();
        assert!(matches!(err, GreeterError::Session(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_template_error_is_server_error() {
        let err: GreeterError = TemplateError::NotFound("login".into()).into();
        assert!(matches!(err, GreeterError::Template(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("login"));
    }

    #[test]
    fn test_server_error_response_hides_details() {
        let err: GreeterError = TemplateError::NotFound("secret".into()).into();

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_io_error() {
        let err: GreeterError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy").into();
        assert!(matches!(err, GreeterError::Io(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
