/// Database row types — these map directly to SQLite rows.
/// Distinct from the stucode-types wire models to keep the DB layer
/// independent; the API layer converts and strips the password column.

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub account_id: String,
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArticleRow {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
    pub image: Option<String>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct LikeRow {
    pub article_id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}
