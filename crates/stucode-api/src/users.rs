use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use stucode_db::queries::{ListFilters, UserPatch};
use stucode_types::api::{ListQuery, UpdateUserRequest};
use stucode_types::messages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{credentials, dto, envelope};

/// Handler for GET /v1/user.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let filters = ListFilters {
        page: query.page,
        limit: query.limit,
        find: query.find,
        order_by: query.order_by,
    };

    let (rows, count) = state.db.list_users(&filters)?;
    let users = rows
        .into_iter()
        .map(dto::user)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(envelope::ok(users, Some(count)))
}

/// Handler for GET /v1/user/{id}.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let Some(row) = state.db.get_user_by_id(&id.to_string())? else {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    };

    Ok(envelope::ok(dto::user(row)?, None))
}

/// Handler for PUT /v1/user/{id}.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
    // A replacement password is hashed before it is stored.
    let password_hash = match &req.password {
        Some(plain) => Some(credentials::hash_password(plain, state.hash_cost)?),
        None => None,
    };

    let patch = UserPatch {
        name: req.name.as_deref(),
        email: req.email.as_deref(),
        password: password_hash.as_deref(),
        logo: req.logo.as_deref(),
    };

    let Some(row) = state.db.update_user(&id.to_string(), &patch)? else {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    };

    Ok(envelope::ok(dto::user(row)?, None))
}

/// Handler for DELETE /v1/user/{id}. Articles and likes go with the user
/// via the schema's cascade rules.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if !state.db.delete_user(&id.to_string())? {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    }

    Ok(envelope::ok_empty())
}
