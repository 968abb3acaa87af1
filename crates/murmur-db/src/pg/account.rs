//! PostgreSQL account repository implementation

use async_trait::async_trait;
use murmur_types::{Account, AccountId, NewAccount};
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::AccountRow;
use crate::repo::AccountRepository;

/// PostgreSQL account repository over the `users` table
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, created_at, updated_at, username, password, name, email
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, created_at, updated_at, username, password, name, email
            FROM users
            WHERE username = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Account::from))
    }

    async fn list(&self) -> DbResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, created_at, updated_at, username, password, name, email
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn create(&self, account: NewAccount) -> DbResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (created_at, updated_at, username, password, name, email)
            VALUES (NOW(), NOW(), $1, $2, $3, $4)
            RETURNING id, created_at, updated_at, username, password, name, email
            "#,
        )
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.name)
        .bind(&account.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, account: &Account) -> DbResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE users
            SET username = $1, password = $2, name = $3, email = $4, updated_at = NOW()
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING id, created_at, updated_at, username, password, name, email
            "#,
        )
        .bind(&account.username)
        .bind(&account.password)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::from).ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: AccountId) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id.0)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
