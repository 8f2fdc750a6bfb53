use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// JWT claims shared between the login handler (encode) and the auth
/// middleware (decode). Canonical definition lives here in stucode-types.
/// The payload is the password-stripped user identity plus expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub account_id: Uuid,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// -- Users --

/// Partial patch; absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub logo: Option<String>,
}

// -- Articles --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateArticleRequest {
    pub user_id: Uuid,
    pub image: Option<String>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateArticleRequest {
    pub image: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

// -- Likes --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LikeRequest {
    pub user_id: Uuid,
}

// -- List filters --

/// Common listing query: `?page=0&limit=20&find=term&orderBy=a-z`.
/// `offset = page * limit`. `find` is a case-insensitive substring match
/// over the resource's searchable columns.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub find: Option<String>,
    pub order_by: Option<String>,
}

/// Article listing adds an optional author filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub find: Option<String>,
    pub order_by: Option<String>,
    pub user_id: Option<Uuid>,
}

fn default_limit() -> u32 {
    20
}
