//! HTTP handlers

mod accounts;
mod auth;
mod health;
mod posts;
mod tables;

pub use accounts::{create_account, delete_account, get_account, list_accounts, update_account};
pub use auth::login;
pub use health::{health, hello, ready};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
pub use tables::list_tables;
