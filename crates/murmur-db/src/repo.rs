//! Repository traits
//!
//! Async interfaces over the resource store. Every lookup ignores
//! soft-deleted records.

use async_trait::async_trait;
use murmur_types::{Account, AccountId, NewAccount, NewPost, Post, PostId};

use crate::error::DbResult;

/// Account repository trait
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>>;

    /// Find the first account with this exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<Account>>;

    /// List all live accounts
    async fn list(&self) -> DbResult<Vec<Account>>;

    /// Create a new account
    async fn create(&self, account: NewAccount) -> DbResult<Account>;

    /// Persist every field of an existing account
    ///
    /// Returns `DbError::NotFound` if the account is gone.
    async fn update(&self, account: &Account) -> DbResult<Account>;

    /// Soft-delete an account
    async fn delete(&self, id: AccountId) -> DbResult<()>;
}

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List live posts owned by an account
    async fn list_by_owner(&self, owner: AccountId) -> DbResult<Vec<Post>>;

    /// Find a post by ID, scoped to its owner
    async fn find(&self, owner: AccountId, id: PostId) -> DbResult<Option<Post>>;

    /// Create a post owned by `owner`
    async fn create(&self, owner: AccountId, post: NewPost) -> DbResult<Post>;

    /// Persist content and likes of an existing post
    async fn update(&self, post: &Post) -> DbResult<Post>;

    /// Soft-delete a post
    async fn delete(&self, id: PostId) -> DbResult<()>;
}

/// Database-level introspection
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Names of the tables visible in the public schema
    async fn list_tables(&self) -> DbResult<Vec<String>>;

    /// Round-trip to the store (readiness checks)
    async fn ping(&self) -> DbResult<()>;
}
