//! PostgreSQL post repository implementation

use async_trait::async_trait;
use murmur_types::{AccountId, NewPost, Post, PostId};
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::PostRow;
use crate::repo::PostRepository;

/// PostgreSQL post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list_by_owner(&self, owner: AccountId) -> DbResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, created_at, updated_at, user_id, content, likes
            FROM posts
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find(&self, owner: AccountId, id: PostId) -> DbResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, created_at, updated_at, user_id, content, likes
            FROM posts
            WHERE user_id = $1 AND id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(owner.0)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn create(&self, owner: AccountId, post: NewPost) -> DbResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (created_at, updated_at, user_id, content, likes)
            VALUES (NOW(), NOW(), $1, $2, $3)
            RETURNING id, created_at, updated_at, user_id, content, likes
            "#,
        )
        .bind(owner.0)
        .bind(&post.content)
        .bind(post.likes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, post: &Post) -> DbResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET content = $1, likes = $2, updated_at = NOW()
            WHERE id = $3 AND deleted_at IS NULL
            RETURNING id, created_at, updated_at, user_id, content, likes
            "#,
        )
        .bind(&post.content)
        .bind(post.likes)
        .bind(post.id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::from).ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: PostId) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id.0)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
