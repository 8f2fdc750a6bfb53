use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::credentials;
use crate::error::ApiError;
use crate::state::AppState;

/// Admission gate for protected routes: extract the bearer token from the
/// `Authorization` header, verify it, and attach the decoded claims to the
/// request. Any missing or invalid piece answers 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or(ApiError::Unauthorized)?;
    if scheme != "Bearer" || token.is_empty() {
        return Err(ApiError::Unauthorized);
    }

    let claims =
        credentials::verify_token(token, &state.jwt_secret).map_err(|_| ApiError::Unauthorized)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
