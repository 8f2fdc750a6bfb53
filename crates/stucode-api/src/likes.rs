use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use stucode_db::queries::ListFilters;
use stucode_types::api::{LikeRequest, ListQuery};
use stucode_types::messages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{dto, envelope};

/// Handler for POST /v1/like/{articleId}. Both sides of the pair must
/// exist; a repeated like answers 409.
pub async fn create_like(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
    Json(req): Json<LikeRequest>,
) -> Result<Response, ApiError> {
    let article_id = article_id.to_string();
    let user_id = req.user_id.to_string();

    if state.db.get_article_by_id(&article_id)?.is_none() {
        return Ok(envelope::not_found(messages::ARTICLE_NOT_FOUND));
    }
    if state.db.get_user_by_id(&user_id)?.is_none() {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    }

    let Some(row) = state.db.create_like(&article_id, &user_id)? else {
        return Ok(envelope::conflict(messages::LIKE_ALREADY_EXISTS));
    };

    Ok(envelope::created(dto::like(row)?))
}

/// Handler for GET /v1/like/{articleId}.
pub async fn list_by_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let filters = list_filters(query);
    let (rows, count) = state
        .db
        .list_likes_by_article(&article_id.to_string(), &filters)?;
    let likes = rows
        .into_iter()
        .map(dto::like)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(envelope::ok(likes, Some(count)))
}

/// Handler for GET /v1/like/user/{userId}.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let filters = list_filters(query);
    let (rows, count) = state
        .db
        .list_likes_by_user(&user_id.to_string(), &filters)?;
    let likes = rows
        .into_iter()
        .map(dto::like)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(envelope::ok(likes, Some(count)))
}

/// Handler for DELETE /v1/like/{articleId}. Removing an absent pair is not
/// an error; the response is the same bare 200.
pub async fn delete_like(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
    Json(req): Json<LikeRequest>,
) -> Result<Response, ApiError> {
    let article_id = article_id.to_string();
    if state.db.get_article_by_id(&article_id)?.is_none() {
        return Ok(envelope::not_found(messages::ARTICLE_NOT_FOUND));
    }

    state.db.delete_like(&article_id, &req.user_id.to_string())?;

    Ok(envelope::ok_empty())
}

fn list_filters(query: ListQuery) -> ListFilters {
    ListFilters {
        page: query.page,
        limit: query.limit,
        find: query.find,
        order_by: query.order_by,
    }
}
