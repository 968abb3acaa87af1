//! HTTP rendering of authorization failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use murmur_auth_core::AuthError;

/// An [`AuthError`] on its way out as a response.
///
/// Body is `{"error": <message>, "code": <CODE>}`. Store failures are
/// reported generically; their detail only goes to the log.
#[derive(Debug)]
pub struct AuthRejection(pub AuthError);

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.error_code(), "authorization failed");
            "service temporarily unavailable".to_string()
        } else {
            tracing::warn!(error = %self.0, code = self.0.error_code(), "authorization rejected");
            self.0.to_string()
        };

        let body = serde_json::json!({
            "error": message,
            "code": self.0.error_code(),
        });

        (status, Json(body)).into_response()
    }
}
