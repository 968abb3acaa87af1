//! Common test utilities for murmur-auth-core integration tests

pub mod stores;

#[allow(unused_imports)]
pub use stores::{seeded_service, CountingStore, FlakyStore, TestService};
