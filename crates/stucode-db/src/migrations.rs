use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id          TEXT PRIMARY KEY,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            enabled     INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            account_id  TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
            name        TEXT,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            logo        TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_users_account
            ON users(account_id);

        CREATE TABLE IF NOT EXISTS articles (
            id          TEXT PRIMARY KEY,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            image       TEXT,
            title       TEXT NOT NULL,
            content     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_articles_user
            ON articles(user_id);

        CREATE TABLE IF NOT EXISTS likes (
            article_id  TEXT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (article_id, user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_likes_user
            ON likes(user_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
