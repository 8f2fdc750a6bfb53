use axum::extract::{Path, State};
use axum::response::Response;
use uuid::Uuid;

use stucode_types::messages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{dto, envelope};

/// Handler for GET /v1/account/{id}.
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let Some(row) = state.db.get_account_by_id(&id.to_string())? else {
        return Ok(envelope::not_found(messages::ACCOUNT_NOT_FOUND));
    };

    Ok(envelope::ok(dto::account(row)?, None))
}

/// Handler for DELETE /v1/account/{id}. The owned user, their articles and
/// likes all go with it.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if !state.db.delete_account(&id.to_string())? {
        return Ok(envelope::not_found(messages::ACCOUNT_NOT_FOUND));
    }

    Ok(envelope::ok_empty())
}
