//! Row-to-wire conversions. Stored ids and timestamps are TEXT; the wire
//! models carry typed values, and the user conversion drops the password.

use anyhow::Result;
use chrono::{DateTime, Utc};

use stucode_db::models::{AccountRow, ArticleRow, LikeRow, UserRow};
use stucode_types::models::{Account, Article, Like, User};

pub(crate) fn user(row: UserRow) -> Result<User> {
    Ok(User {
        id: row.id.parse()?,
        created_at: timestamp(&row.created_at)?,
        updated_at: timestamp(&row.updated_at)?,
        account_id: row.account_id.parse()?,
        name: row.name,
        email: row.email,
        logo: row.logo,
    })
}

pub(crate) fn account(row: AccountRow) -> Result<Account> {
    Ok(Account {
        id: row.id.parse()?,
        created_at: timestamp(&row.created_at)?,
        updated_at: timestamp(&row.updated_at)?,
        enabled: row.enabled,
    })
}

pub(crate) fn article(row: ArticleRow) -> Result<Article> {
    Ok(Article {
        id: row.id.parse()?,
        created_at: timestamp(&row.created_at)?,
        updated_at: timestamp(&row.updated_at)?,
        user_id: row.user_id.parse()?,
        image: row.image,
        title: row.title,
        content: row.content,
    })
}

pub(crate) fn like(row: LikeRow) -> Result<Like> {
    Ok(Like {
        article_id: row.article_id.parse()?,
        user_id: row.user_id.parse()?,
        created_at: timestamp(&row.created_at)?,
        updated_at: timestamp(&row.updated_at)?,
    })
}

fn timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
