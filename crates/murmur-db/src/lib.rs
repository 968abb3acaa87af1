//! Murmur DB - Resource store
//!
//! SQLx-based persistence for accounts and posts, plus an in-memory
//! implementation of the same repository traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use murmur_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/murmur").await?;
//! let repos = Repositories::new(pool);
//!
//! let account = repos.accounts.find_by_username("alice").await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
