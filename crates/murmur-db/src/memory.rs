//! In-memory resource store
//!
//! Implements every repository trait over `DashMap`s. Used by tests and
//! by local runs without PostgreSQL. Deletes are soft, as in the SQL
//! tables: a row keeps its `deleted_at` and every read skips it.
//! `set_unavailable` makes every call fail with `DbError::Unavailable`,
//! for exercising outage paths.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use murmur_types::{Account, AccountId, NewAccount, NewPost, Post, PostId};

use crate::error::{DbError, DbResult};
use crate::repo::{AccountRepository, CatalogRepository, PostRepository};

/// A stored record and its soft-delete timestamp
#[derive(Debug, Clone)]
struct Row<T> {
    record: T,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn new(record: T) -> Self {
        Self {
            record,
            deleted_at: None,
        }
    }

    fn live(&self) -> Option<&T> {
        self.deleted_at.is_none().then_some(&self.record)
    }
}

/// In-memory accounts and posts
#[derive(Default, Clone)]
pub struct MemoryStore {
    accounts: Arc<DashMap<i64, Row<Account>>>,
    posts: Arc<DashMap<i64, Row<Post>>>,
    next_id: Arc<AtomicI64>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage (or recovery) of the backing store
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>> {
        self.check()?;
        Ok(self
            .accounts
            .get(&id.0)
            .and_then(|r| r.value().live().cloned()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        self.check()?;
        Ok(self
            .accounts
            .iter()
            .filter(|r| r.value().live().is_some_and(|a| a.username == username))
            .min_by_key(|r| *r.key())
            .map(|r| r.value().record.clone()))
    }

    async fn list(&self) -> DbResult<Vec<Account>> {
        self.check()?;
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter_map(|r| r.value().live().cloned())
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn create(&self, account: NewAccount) -> DbResult<Account> {
        self.check()?;
        let now = Utc::now();
        let record = Account {
            id: AccountId(self.allocate_id()),
            created_at: now,
            updated_at: now,
            username: account.username,
            password: account.password,
            name: account.name,
            email: account.email,
        };
        self.accounts.insert(record.id.0, Row::new(record.clone()));
        Ok(record)
    }

    async fn update(&self, account: &Account) -> DbResult<Account> {
        self.check()?;
        let mut stored = self
            .accounts
            .get_mut(&account.id.0)
            .filter(|r| r.deleted_at.is_none())
            .ok_or(DbError::NotFound)?;
        stored.record = Account {
            updated_at: Utc::now(),
            ..account.clone()
        };
        Ok(stored.record.clone())
    }

    async fn delete(&self, id: AccountId) -> DbResult<()> {
        self.check()?;
        let mut stored = self
            .accounts
            .get_mut(&id.0)
            .filter(|r| r.deleted_at.is_none())
            .ok_or(DbError::NotFound)?;
        stored.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_by_owner(&self, owner: AccountId) -> DbResult<Vec<Post>> {
        self.check()?;
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter_map(|r| r.value().live().filter(|p| p.user_id == owner).cloned())
            .collect();
        posts.sort_by_key(|p| p.id.0);
        Ok(posts)
    }

    async fn find(&self, owner: AccountId, id: PostId) -> DbResult<Option<Post>> {
        self.check()?;
        Ok(self
            .posts
            .get(&id.0)
            .and_then(|r| r.value().live().filter(|p| p.user_id == owner).cloned()))
    }

    async fn create(&self, owner: AccountId, post: NewPost) -> DbResult<Post> {
        self.check()?;
        let now = Utc::now();
        let record = Post {
            id: PostId(self.allocate_id()),
            created_at: now,
            updated_at: now,
            user_id: owner,
            content: post.content,
            likes: post.likes,
        };
        self.posts.insert(record.id.0, Row::new(record.clone()));
        Ok(record)
    }

    async fn update(&self, post: &Post) -> DbResult<Post> {
        self.check()?;
        let mut stored = self
            .posts
            .get_mut(&post.id.0)
            .filter(|r| r.deleted_at.is_none())
            .ok_or(DbError::NotFound)?;
        stored.record.content = post.content.clone();
        stored.record.likes = post.likes;
        stored.record.updated_at = Utc::now();
        Ok(stored.record.clone())
    }

    async fn delete(&self, id: PostId) -> DbResult<()> {
        self.check()?;
        let mut stored = self
            .posts
            .get_mut(&id.0)
            .filter(|r| r.deleted_at.is_none())
            .ok_or(DbError::NotFound)?;
        stored.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_tables(&self) -> DbResult<Vec<String>> {
        self.check()?;
        Ok(vec!["posts".to_string(), "users".to_string()])
    }

    async fn ping(&self) -> DbResult<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password: "pw".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_username_lookup_is_exact() {
        let store = MemoryStore::new();
        AccountRepository::create(&store, new_account("alice")).await.unwrap();

        assert!(store.find_by_username("alice").await.unwrap().is_some());
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
        assert!(store.find_by_username("alic").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_posts_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = AccountRepository::create(&store, new_account("alice")).await.unwrap();
        let bob = AccountRepository::create(&store, new_account("bob")).await.unwrap();

        let post = PostRepository::create(&store, alice.id, NewPost::default())
            .await
            .unwrap();

        assert!(store.find(alice.id, post.id).await.unwrap().is_some());
        assert!(store.find(bob.id, post.id).await.unwrap().is_none());
        assert_eq!(store.list_by_owner(bob.id).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_deleted_account_is_gone() {
        let store = MemoryStore::new();
        let alice = AccountRepository::create(&store, new_account("alice")).await.unwrap();

        AccountRepository::delete(&store, alice.id).await.unwrap();
        assert!(store.find_by_id(alice.id).await.unwrap().is_none());
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.list().await.unwrap().is_empty());
        assert!(matches!(
            AccountRepository::update(&store, &alice).await,
            Err(DbError::NotFound)
        ));
        assert!(matches!(
            AccountRepository::delete(&store, alice.id).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let store = MemoryStore::new();
        let alice = AccountRepository::create(&store, new_account("alice")).await.unwrap();
        let post = PostRepository::create(&store, alice.id, NewPost::default())
            .await
            .unwrap();

        AccountRepository::delete(&store, alice.id).await.unwrap();
        PostRepository::delete(&store, post.id).await.unwrap();

        // Rows are kept with a deletion timestamp
        let account_row = store.accounts.get(&alice.id.0).unwrap();
        assert!(account_row.deleted_at.is_some());
        assert_eq!(account_row.record.username, "alice");
        assert!(store.posts.get(&post.id.0).unwrap().deleted_at.is_some());

        assert!(store.find(alice.id, post.id).await.unwrap().is_none());
        assert!(store.list_by_owner(alice.id).await.unwrap().is_empty());
        assert!(matches!(
            PostRepository::update(&store, &post).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_username_reusable_after_delete() {
        let store = MemoryStore::new();
        let first = AccountRepository::create(&store, new_account("alice")).await.unwrap();
        AccountRepository::delete(&store, first.id).await.unwrap();
        let second = AccountRepository::create(&store, new_account("alice")).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn test_unavailable_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.find_by_username("alice").await,
            Err(DbError::Unavailable(_))
        ));
        assert!(store.ping().await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
