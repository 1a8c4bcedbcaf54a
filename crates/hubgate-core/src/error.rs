//! Verification error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result type for verification.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Reasons a webhook delivery is rejected.
///
/// The `Display` text of each variant is the response body sent to the
/// client; [`VerifyError::status`] gives the status code.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The request method is not `POST`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request declares an empty body.
    #[error("Missing Body")]
    MissingBody,

    /// The signature header is absent or empty.
    #[error("Missing Header")]
    MissingHeader,

    /// The signature header does not match the body.
    #[error("Invalid Signature")]
    InvalidSignature,

    /// Reading the request body failed.
    #[error("{0}")]
    Io(#[source] axum::Error),
}

impl VerifyError {
    /// HTTP status code for this rejection.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingBody | Self::MissingHeader | Self::InvalidSignature | Self::Io(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        match &self {
            Self::Io(cause) => {
                tracing::error!(error = %cause, "Failed to read webhook body");
            }
            _ => tracing::warn!(reason = %self, "Rejected webhook delivery"),
        }

        (self.status(), self.to_string()).into_response()
    }
}
