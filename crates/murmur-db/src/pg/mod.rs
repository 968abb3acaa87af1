//! PostgreSQL repository implementations

mod account;
mod catalog;
mod post;

pub use account::PgAccountRepository;
pub use catalog::PgCatalogRepository;
pub use post::PgPostRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub accounts: PgAccountRepository,
    pub posts: PgPostRepository,
    pub catalog: PgCatalogRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            accounts: PgAccountRepository::new(pool.clone()),
            posts: PgPostRepository::new(pool.clone()),
            catalog: PgCatalogRepository::new(pool),
        }
    }
}
