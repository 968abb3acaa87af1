//! Common test utilities for murmur-axum integration tests

pub mod capture;

pub use capture::{CaptureLayer, CapturedEvent};
