//! Murmur Axum Integration
//!
//! Axum middleware and extractors for the murmur session pipeline.
//!
//! # Overview
//!
//! - **[`CorrelationLayer`]**: outermost tower layer. Assigns a correlation id,
//!   runs the request inside a `request` span and emits one completion record.
//! - **[`RequestContext`]**: per-request value inserted by the layer and
//!   extended once with the authenticated subject.
//! - **[`require_owner`]**: `route_layer` middleware enforcing that the
//!   bearer session's subject owns the `{uid}` path segment.
//!
//! # Quick Start
//!
//! ```ignore
//! use axum::{middleware, routing::put, Router};
//! use murmur_axum::{require_owner, CorrelationLayer};
//!
//! let guarded = Router::new()
//!     .route("/users/{uid}", put(update_account))
//!     .route_layer(middleware::from_fn_with_state(auth.clone(), require_owner));
//!
//! let app = Router::new()
//!     .merge(guarded)
//!     .layer(CorrelationLayer::new(Duration::from_secs(30)));
//! ```

pub mod context;
pub mod correlation;
pub mod error;
pub mod guard;

pub use context::{RequestContext, REQUEST_ID_HEADER};
pub use correlation::{CorrelationFuture, CorrelationLayer, CorrelationService};
pub use error::AuthRejection;
pub use guard::{require_owner, OWNER_PARAM};
