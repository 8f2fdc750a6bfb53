use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use stucode_db::queries::{ArticlePatch, ListFilters};
use stucode_types::api::{ArticleListQuery, CreateArticleRequest, UpdateArticleRequest};
use stucode_types::messages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{dto, envelope};

/// Handler for POST /v1/article. The author must exist before the insert,
/// so a bad `userId` never leaves an orphan row behind.
pub async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<CreateArticleRequest>,
) -> Result<Response, ApiError> {
    let user_id = req.user_id.to_string();
    if state.db.get_user_by_id(&user_id)?.is_none() {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    }

    let id = Uuid::new_v4();
    let row = state.db.create_article(
        &id.to_string(),
        &user_id,
        req.image.as_deref(),
        &req.title,
        &req.content,
    )?;

    Ok(envelope::created(dto::article(row)?))
}

/// Handler for GET /v1/article.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Response, ApiError> {
    let filters = ListFilters {
        page: query.page,
        limit: query.limit,
        find: query.find,
        order_by: query.order_by,
    };
    let user_id = query.user_id.map(|id| id.to_string());

    let (rows, count) = state.db.list_articles(&filters, user_id.as_deref())?;
    let articles = rows
        .into_iter()
        .map(dto::article)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(envelope::ok(articles, Some(count)))
}

/// Handler for GET /v1/article/{id}.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let Some(row) = state.db.get_article_by_id(&id.to_string())? else {
        return Ok(envelope::not_found(messages::ARTICLE_NOT_FOUND));
    };

    Ok(envelope::ok(dto::article(row)?, None))
}

/// Handler for PUT /v1/article/{id}.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<Response, ApiError> {
    let patch = ArticlePatch {
        image: req.image.as_deref(),
        title: req.title.as_deref(),
        content: req.content.as_deref(),
    };

    let Some(row) = state.db.update_article(&id.to_string(), &patch)? else {
        return Ok(envelope::not_found(messages::ARTICLE_NOT_FOUND));
    };

    Ok(envelope::ok(dto::article(row)?, None))
}

/// Handler for DELETE /v1/article/{id}.
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if !state.db.delete_article(&id.to_string())? {
        return Ok(envelope::not_found(messages::ARTICLE_NOT_FOUND));
    }

    Ok(envelope::ok_empty())
}
