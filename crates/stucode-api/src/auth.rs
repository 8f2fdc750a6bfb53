use axum::Json;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use uuid::Uuid;

use stucode_types::api::{Claims, LoginRequest, RegisterRequest};
use stucode_types::messages;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{credentials, dto, envelope};

/// Handler for POST /v1/user/register (alias /v1/auth/register).
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    if !is_valid_email(&req.email) {
        return Ok(envelope::bad_request(messages::EMAIL_FORMAT_NOT_VALID));
    }

    if state.db.get_user_by_email(&req.email)?.is_some() {
        return Ok(envelope::conflict(messages::EMAIL_ALREADY_EXISTS));
    }

    let password_hash = credentials::hash_password(&req.password, state.hash_cost)?;

    // The one multi-statement write: account row, then user row referencing
    // it, committed or rolled back together.
    let account_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let row = state.db.create_account_and_user(
        &account_id.to_string(),
        &user_id.to_string(),
        req.name.as_deref(),
        &req.email,
        &password_hash,
        req.logo.as_deref(),
    )?;

    Ok(envelope::created(dto::user(row)?))
}

/// Handler for POST /v1/user/login (alias /v1/auth/login).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if !is_valid_email(&req.email) {
        return Ok(envelope::bad_request(messages::EMAIL_FORMAT_NOT_VALID));
    }

    let Some(row) = state.db.get_user_by_email(&req.email)? else {
        return Ok(envelope::not_found(messages::USER_NOT_FOUND));
    };

    if !credentials::verify_password(&req.password, &row.password)? {
        return Ok(envelope::bad_request(messages::PASSWORD_NOT_VALID));
    }

    // Sign the password-stripped identity into the token.
    let user = dto::user(row)?;
    let exp = (Utc::now() + chrono::Duration::days(state.token_ttl_days)).timestamp() as usize;
    let claims = Claims {
        sub: user.id,
        email: user.email,
        name: user.name,
        account_id: user.account_id,
        exp,
    };
    let token = credentials::sign_token(&claims, &state.jwt_secret)?;

    Ok(envelope::ok(token, None))
}

/// Structural check only: one '@', non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("test@test.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@test.com"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("test@nodot"));
        assert!(!is_valid_email("test@.com"));
        assert!(!is_valid_email("test@test.com."));
        assert!(!is_valid_email("te st@test.com"));
    }
}
