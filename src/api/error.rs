use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::error::UserError;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.is_classified() {
            warn!(status = %status, error = %self, "Request rejected");
        } else {
            error!(error = %self, "Request failed");
        }

        match self.into_envelope() {
            Some(envelope) => (status, Json(envelope)).into_response(),
            None => (status, "Internal server error").into_response(),
        }
    }
}
