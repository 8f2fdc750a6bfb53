use std::sync::Arc;

use stucode_db::Database;

pub type AppState = Arc<AppStateInner>;

/// Process-scoped resources, acquired once at startup and injected into
/// every handler. The database handle is never a global.
pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// Argon2 time cost used when hashing passwords.
    pub hash_cost: u32,
    pub token_ttl_days: i64,
}
