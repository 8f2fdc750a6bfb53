use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, ToSql, params};

use crate::Database;
use crate::models::{AccountRow, ArticleRow, LikeRow, UserRow};

const ACCOUNT_COLUMNS: &str = "id, created_at, updated_at, enabled";
const USER_COLUMNS: &str = "id, created_at, updated_at, account_id, name, email, password, logo";
const ARTICLE_COLUMNS: &str = "id, created_at, updated_at, user_id, image, title, content";
const LIKE_COLUMNS: &str = "article_id, user_id, created_at, updated_at";

/// Listing filters shared by the paginated queries. `offset = page * limit`;
/// `find` is a case-insensitive substring match over the resource's
/// searchable columns.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub page: u32,
    pub limit: u32,
    pub find: Option<String>,
    pub order_by: Option<String>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Default)]
pub struct UserPatch<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub logo: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct ArticlePatch<'a> {
    pub image: Option<&'a str>,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

impl Database {
    // -- Registration --

    /// Creates an account row and a user row referencing it inside one
    /// transaction; a failure on either insert rolls back both.
    pub fn create_account_and_user(
        &self,
        account_id: &str,
        user_id: &str,
        name: Option<&str>,
        email: &str,
        password_hash: &str,
        logo: Option<&str>,
    ) -> Result<UserRow> {
        self.with_conn_mut(|conn| {
            let now = now();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO accounts (id, created_at, updated_at, enabled) VALUES (?1, ?2, ?2, 1)",
                params![account_id, now],
            )?;
            tx.execute(
                "INSERT INTO users (id, created_at, updated_at, account_id, name, email, password, logo)
                 VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![user_id, now, account_id, name, email, password_hash, logo],
            )?;
            tx.commit()?;

            query_user_by_id(conn, user_id)?
                .ok_or_else(|| anyhow!("user {} missing after insert", user_id))
        })
    }

    // -- Users --

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;
            Ok(stmt.query_row([email], map_user).optional()?)
        })
    }

    pub fn list_users(&self, filters: &ListFilters) -> Result<(Vec<UserRow>, u64)> {
        self.with_conn(|conn| {
            let order = alpha_order(filters.order_by.as_deref());
            let pattern = filters.find.as_ref().map(|find| format!("%{find}%"));
            let limit = filters.limit as i64;
            let offset = filters.page as i64 * limit;

            let where_sql = match &pattern {
                Some(_) => "WHERE name LIKE ?1 OR email LIKE ?1",
                None => "",
            };
            let mut where_params: Vec<&dyn ToSql> = Vec::new();
            if let Some(pattern) = &pattern {
                where_params.push(pattern);
            }

            let count: u64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM users {where_sql}"),
                where_params.as_slice(),
                |row| row.get(0),
            )?;

            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users {where_sql} ORDER BY name {order} LIMIT ?{} OFFSET ?{}",
                where_params.len() + 1,
                where_params.len() + 2,
            );
            let mut page_params = where_params;
            page_params.push(&limit);
            page_params.push(&offset);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(page_params.as_slice(), map_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok((rows, count))
        })
    }

    pub fn update_user(&self, id: &str, patch: &UserPatch<'_>) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let Some(existing) = query_user_by_id(conn, id)? else {
                return Ok(None);
            };

            let name = patch.name.map(str::to_string).or(existing.name);
            let email = patch.email.map(str::to_string).unwrap_or(existing.email);
            let password = patch.password.map(str::to_string).unwrap_or(existing.password);
            let logo = patch.logo.map(str::to_string).or(existing.logo);

            conn.execute(
                "UPDATE users SET name = ?2, email = ?3, password = ?4, logo = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![id, name, email, password, logo, now()],
            )?;

            query_user_by_id(conn, id)
        })
    }

    pub fn delete_user(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])? > 0))
    }

    // -- Accounts --

    pub fn get_account_by_id(&self, id: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"))?;
            Ok(stmt.query_row([id], map_account).optional()?)
        })
    }

    pub fn delete_account(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM accounts WHERE id = ?1", [id])? > 0))
    }

    // -- Articles --

    pub fn create_article(
        &self,
        id: &str,
        user_id: &str,
        image: Option<&str>,
        title: &str,
        content: &str,
    ) -> Result<ArticleRow> {
        self.with_conn(|conn| {
            let now = now();
            conn.execute(
                "INSERT INTO articles (id, created_at, updated_at, user_id, image, title, content)
                 VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6)",
                params![id, now, user_id, image, title, content],
            )?;

            query_article_by_id(conn, id)?
                .ok_or_else(|| anyhow!("article {} missing after insert", id))
        })
    }

    pub fn get_article_by_id(&self, id: &str) -> Result<Option<ArticleRow>> {
        self.with_conn(|conn| query_article_by_id(conn, id))
    }

    pub fn list_articles(
        &self,
        filters: &ListFilters,
        user_id: Option<&str>,
    ) -> Result<(Vec<ArticleRow>, u64)> {
        self.with_conn(|conn| {
            let order = alpha_order(filters.order_by.as_deref());
            let pattern = filters.find.as_ref().map(|find| format!("%{find}%"));
            let limit = filters.limit as i64;
            let offset = filters.page as i64 * limit;

            let mut conds: Vec<String> = Vec::new();
            let mut where_params: Vec<&dyn ToSql> = Vec::new();
            if let Some(user_id) = &user_id {
                where_params.push(user_id);
                conds.push(format!("user_id = ?{}", where_params.len()));
            }
            if let Some(pattern) = &pattern {
                where_params.push(pattern);
                conds.push(format!(
                    "(title LIKE ?{n} OR content LIKE ?{n})",
                    n = where_params.len()
                ));
            }
            let where_sql = if conds.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", conds.join(" AND "))
            };

            let count: u64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM articles {where_sql}"),
                where_params.as_slice(),
                |row| row.get(0),
            )?;

            let sql = format!(
                "SELECT {ARTICLE_COLUMNS} FROM articles {where_sql} ORDER BY title {order} LIMIT ?{} OFFSET ?{}",
                where_params.len() + 1,
                where_params.len() + 2,
            );
            let mut page_params = where_params;
            page_params.push(&limit);
            page_params.push(&offset);

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(page_params.as_slice(), map_article)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok((rows, count))
        })
    }

    pub fn update_article(&self, id: &str, patch: &ArticlePatch<'_>) -> Result<Option<ArticleRow>> {
        self.with_conn(|conn| {
            let Some(existing) = query_article_by_id(conn, id)? else {
                return Ok(None);
            };

            let image = patch.image.map(str::to_string).or(existing.image);
            let title = patch.title.map(str::to_string).unwrap_or(existing.title);
            let content = patch.content.map(str::to_string).unwrap_or(existing.content);

            conn.execute(
                "UPDATE articles SET image = ?2, title = ?3, content = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![id, image, title, content, now()],
            )?;

            query_article_by_id(conn, id)
        })
    }

    pub fn delete_article(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM articles WHERE id = ?1", [id])? > 0))
    }

    // -- Likes --

    /// Inserts a like unless the (article, user) pair already exists.
    /// Returns `None` on a duplicate so the caller can answer 409
    /// deterministically instead of surfacing a constraint error.
    pub fn create_like(&self, article_id: &str, user_id: &str) -> Result<Option<LikeRow>> {
        self.with_conn(|conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT article_id FROM likes WHERE article_id = ?1 AND user_id = ?2",
                    params![article_id, user_id],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Ok(None);
            }

            let now = now();
            conn.execute(
                "INSERT INTO likes (article_id, user_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![article_id, user_id, now],
            )?;

            let row = query_like(conn, article_id, user_id)?.ok_or_else(|| {
                anyhow!("like ({}, {}) missing after insert", article_id, user_id)
            })?;
            Ok(Some(row))
        })
    }

    pub fn list_likes_by_article(
        &self,
        article_id: &str,
        filters: &ListFilters,
    ) -> Result<(Vec<LikeRow>, u64)> {
        self.with_conn(|conn| query_likes(conn, "article_id", article_id, filters))
    }

    pub fn list_likes_by_user(
        &self,
        user_id: &str,
        filters: &ListFilters,
    ) -> Result<(Vec<LikeRow>, u64)> {
        self.with_conn(|conn| query_likes(conn, "user_id", user_id, filters))
    }

    pub fn delete_like(&self, article_id: &str, user_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.execute(
                "DELETE FROM likes WHERE article_id = ?1 AND user_id = ?2",
                params![article_id, user_id],
            )? > 0)
        })
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// `a-z` sorts ascending; anything else (including `z-a`) descending.
fn alpha_order(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("a-z") => "ASC",
        _ => "DESC",
    }
}

fn updated_order(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("updated-at-asc") => "ASC",
        _ => "DESC",
    }
}

fn query_user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

fn query_article_by_id(conn: &Connection, id: &str) -> Result<Option<ArticleRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_article).optional()?)
}

fn query_like(conn: &Connection, article_id: &str, user_id: &str) -> Result<Option<LikeRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LIKE_COLUMNS} FROM likes WHERE article_id = ?1 AND user_id = ?2"
    ))?;
    Ok(stmt
        .query_row(params![article_id, user_id], map_like)
        .optional()?)
}

fn query_likes(
    conn: &Connection,
    key_column: &str,
    key: &str,
    filters: &ListFilters,
) -> Result<(Vec<LikeRow>, u64)> {
    let order = updated_order(filters.order_by.as_deref());
    let limit = filters.limit as i64;
    let offset = filters.page as i64 * limit;

    let count: u64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM likes WHERE {key_column} = ?1"),
        [key],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {LIKE_COLUMNS} FROM likes WHERE {key_column} = ?1 ORDER BY updated_at {order} LIMIT ?2 OFFSET ?3"
    ))?;
    let rows = stmt
        .query_map(params![key, limit, offset], map_like)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok((rows, count))
}

fn map_account(row: &rusqlite::Row) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        enabled: row.get(3)?,
    })
}

fn map_user(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        account_id: row.get(3)?,
        name: row.get(4)?,
        email: row.get(5)?,
        password: row.get(6)?,
        logo: row.get(7)?,
    })
}

fn map_article(row: &rusqlite::Row) -> rusqlite::Result<ArticleRow> {
    Ok(ArticleRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        user_id: row.get(3)?,
        image: row.get(4)?,
        title: row.get(5)?,
        content: row.get(6)?,
    })
}

fn map_like(row: &rusqlite::Row) -> rusqlite::Result<LikeRow> {
    Ok(LikeRow {
        article_id: row.get(0)?,
        user_id: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn seed_user(db: &Database, tag: &str, name: &str, email: &str) -> UserRow {
        db.create_account_and_user(
            &format!("account-{tag}"),
            &format!("user-{tag}"),
            Some(name),
            email,
            "hash",
            None,
        )
        .unwrap()
    }

    fn table_count(db: &Database, table: &str) -> i64 {
        db.with_conn(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?)
        })
        .unwrap()
    }

    #[test]
    fn registration_commits_account_and_user() {
        let db = db();
        let user = seed_user(&db, "1", "alice", "alice@test.com");

        assert_eq!(user.account_id, "account-1");
        assert_eq!(user.email, "alice@test.com");
        assert_eq!(table_count(&db, "accounts"), 1);
        assert_eq!(table_count(&db, "users"), 1);
    }

    #[test]
    fn registration_rolls_back_on_duplicate_email() {
        let db = db();
        seed_user(&db, "1", "alice", "alice@test.com");

        let result = db.create_account_and_user(
            "account-2",
            "user-2",
            Some("bob"),
            "alice@test.com",
            "hash",
            None,
        );

        assert!(result.is_err());
        // The account insert succeeded inside the transaction but must not survive it.
        assert_eq!(table_count(&db, "accounts"), 1);
        assert_eq!(table_count(&db, "users"), 1);
    }

    #[test]
    fn list_users_paginates_and_counts() {
        let db = db();
        seed_user(&db, "1", "alice", "alice@test.com");
        seed_user(&db, "2", "bob", "bob@test.com");
        seed_user(&db, "3", "carol", "carol@test.com");

        let filters = ListFilters {
            page: 0,
            limit: 2,
            ..ListFilters::default()
        };
        let (rows, count) = db.list_users(&filters).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(count, 3);

        let filters = ListFilters {
            page: 1,
            limit: 2,
            ..ListFilters::default()
        };
        let (rows, count) = db.list_users(&filters).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn list_users_find_matches_name_or_email() {
        let db = db();
        seed_user(&db, "1", "alice", "alice@test.com");
        seed_user(&db, "2", "bob", "bob@other.org");

        let filters = ListFilters {
            page: 0,
            limit: 20,
            find: Some("other".into()),
            order_by: None,
        };
        let (rows, count) = db.list_users(&filters).unwrap();
        assert_eq!(count, 1);
        assert_eq!(rows[0].email, "bob@other.org");

        let filters = ListFilters {
            page: 0,
            limit: 20,
            find: Some("ALI".into()),
            order_by: None,
        };
        let (_, count) = db.list_users(&filters).unwrap();
        assert_eq!(count, 1, "LIKE match is case-insensitive");
    }

    #[test]
    fn list_users_orders_by_name() {
        let db = db();
        seed_user(&db, "1", "bob", "bob@test.com");
        seed_user(&db, "2", "alice", "alice@test.com");

        let filters = ListFilters {
            page: 0,
            limit: 20,
            find: None,
            order_by: Some("a-z".into()),
        };
        let (rows, _) = db.list_users(&filters).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("alice"));

        let filters = ListFilters {
            page: 0,
            limit: 20,
            find: None,
            order_by: Some("z-a".into()),
        };
        let (rows, _) = db.list_users(&filters).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("bob"));
    }

    #[test]
    fn update_user_merges_partial_patch() {
        let db = db();
        let user = seed_user(&db, "1", "alice", "alice@test.com");

        let patch = UserPatch {
            name: Some("alicia"),
            ..UserPatch::default()
        };
        let updated = db.update_user(&user.id, &patch).unwrap().unwrap();

        assert_eq!(updated.name.as_deref(), Some("alicia"));
        assert_eq!(updated.email, "alice@test.com");
        assert_eq!(updated.password, "hash");
    }

    #[test]
    fn update_missing_user_returns_none() {
        let db = db();
        let patch = UserPatch::default();
        assert!(db.update_user("nope", &patch).unwrap().is_none());
    }

    #[test]
    fn articles_filter_by_author_and_term() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        let bob = seed_user(&db, "2", "bob", "bob@test.com");
        db.create_article("art-1", &alice.id, None, "Rust tips", "borrowing")
            .unwrap();
        db.create_article("art-2", &alice.id, None, "Cooking", "pasta")
            .unwrap();
        db.create_article("art-3", &bob.id, None, "Rust tricks", "lifetimes")
            .unwrap();

        let filters = ListFilters {
            page: 0,
            limit: 20,
            find: Some("rust".into()),
            order_by: Some("a-z".into()),
        };
        let (rows, count) = db.list_articles(&filters, None).unwrap();
        assert_eq!(count, 2);
        assert_eq!(rows[0].title, "Rust tips");

        let (rows, count) = db.list_articles(&filters, Some(&alice.id)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(rows[0].id, "art-1");
    }

    #[test]
    fn create_like_detects_duplicate() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        db.create_article("art-1", &alice.id, None, "title", "content")
            .unwrap();

        let first = db.create_like("art-1", &alice.id).unwrap();
        assert!(first.is_some());

        let second = db.create_like("art-1", &alice.id).unwrap();
        assert!(second.is_none());
        assert_eq!(table_count(&db, "likes"), 1);
    }

    #[test]
    fn delete_like_reports_whether_a_row_was_removed() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        db.create_article("art-1", &alice.id, None, "title", "content")
            .unwrap();
        db.create_like("art-1", &alice.id).unwrap();

        assert!(db.delete_like("art-1", &alice.id).unwrap());
        assert!(!db.delete_like("art-1", &alice.id).unwrap());
    }

    #[test]
    fn likes_list_by_article_and_user() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        let bob = seed_user(&db, "2", "bob", "bob@test.com");
        db.create_article("art-1", &alice.id, None, "title", "content")
            .unwrap();
        db.create_like("art-1", &alice.id).unwrap();
        db.create_like("art-1", &bob.id).unwrap();

        let filters = ListFilters {
            page: 0,
            limit: 20,
            ..ListFilters::default()
        };
        let (rows, count) = db.list_likes_by_article("art-1", &filters).unwrap();
        assert_eq!(count, 2);
        assert_eq!(rows.len(), 2);

        let (rows, count) = db.list_likes_by_user(&bob.id, &filters).unwrap();
        assert_eq!(count, 1);
        assert_eq!(rows[0].user_id, bob.id);
    }

    #[test]
    fn delete_account_cascades_to_user_articles_and_likes() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        db.create_article("art-1", &alice.id, None, "title", "content")
            .unwrap();
        db.create_like("art-1", &alice.id).unwrap();

        assert!(db.delete_account(&alice.account_id).unwrap());

        assert_eq!(table_count(&db, "users"), 0);
        assert_eq!(table_count(&db, "articles"), 0);
        assert_eq!(table_count(&db, "likes"), 0);
    }

    #[test]
    fn delete_user_cascades_to_articles() {
        let db = db();
        let alice = seed_user(&db, "1", "alice", "alice@test.com");
        db.create_article("art-1", &alice.id, None, "title", "content")
            .unwrap();

        assert!(db.delete_user(&alice.id).unwrap());
        assert_eq!(table_count(&db, "articles"), 0);
        // The owning account survives; only the account delete cascades down.
        assert_eq!(table_count(&db, "accounts"), 1);
    }
}
