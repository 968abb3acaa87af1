//! Database row models
//!
//! Rows map directly to the `users` and `posts` tables through SQLx's
//! FromRow derive and convert into the public record types.

use chrono::{DateTime, Utc};
use murmur_types::{Account, AccountId, Post, PostId};
use sqlx::FromRow;

/// Account row from the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: AccountId(row.id),
            created_at: row.created_at,
            updated_at: row.updated_at,
            username: row.username,
            password: row.password,
            name: row.name,
            email: row.email,
        }
    }
}

/// Post row from the `posts` table
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
    pub content: String,
    pub likes: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId(row.id),
            created_at: row.created_at,
            updated_at: row.updated_at,
            user_id: AccountId(row.user_id),
            content: row.content,
            likes: row.likes,
        }
    }
}
