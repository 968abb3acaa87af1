//! Connection pool for the PostgreSQL resource store

use sqlx::PgPool;

use crate::DbResult;

/// Pool shared by every PostgreSQL repository
pub type DbPool = PgPool;

/// Connect to the resource store
///
/// Pool sizing is left to sqlx defaults.
pub async fn create_pool(database_url: &str) -> DbResult<DbPool> {
    let pool = PgPool::connect(database_url).await?;
    tracing::debug!("resource store pool connected");
    Ok(pool)
}
