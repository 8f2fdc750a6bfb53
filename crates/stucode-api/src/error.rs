use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use stucode_types::messages;

use crate::envelope;

/// Terminal error type for handlers and middleware. Expected outcomes
/// (validation, not-found, conflict) are answered inline with envelopes and
/// never reach this; what lands here is an authentication failure or an
/// unexpected fault.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", messages::UNAUTHORIZED)]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                warn!("rejected request: {}", messages::UNAUTHORIZED);
                envelope::unauthorized(messages::UNAUTHORIZED)
            }
            ApiError::Internal(err) => {
                // Full detail stays server-side; the client sees only the
                // generic envelope.
                error!("unexpected error: {:#}", err);
                envelope::internal_error()
            }
        }
    }
}
