//! Murmur Types - Shared domain types
//!
//! This crate contains domain types used across murmur crates:
//! - Account identity and records
//! - Posts owned by accounts
//! - Partial-update change sets with field-merge semantics

pub mod account;
pub mod error;
pub mod post;

pub use account::*;
pub use error::*;
pub use post::*;
