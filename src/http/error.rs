use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::utils::error::VoucherError;

impl IntoResponse for VoucherError {
    fn into_response(self) -> Response {
        match self {
            VoucherError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            VoucherError::ValidationError { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            other => {
                // Collaborator failures stay in the log; clients get no
                // internals.
                error!("Request failed: {other}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
