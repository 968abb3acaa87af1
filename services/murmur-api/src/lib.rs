//! Murmur API
//!
//! Account and post resources behind bearer-session authorization.
//!
//! ## Public endpoints
//!
//! - `GET /hello`
//! - `POST /login` - fields `u`, `p` from the query or a form body; returns `{"Token": ...}`
//! - `GET /users`, `GET /users/{uid}`, `POST /users`
//! - `GET /users/{uid}/posts`, `GET /users/{uid}/posts/{pid}`
//!
//! ## Owner-only endpoints (`Authorization: Bearer <token>`)
//!
//! - `GET /tables/{uid}`
//! - `PUT /users/{uid}`, `DELETE /users/{uid}`
//! - `POST /users/{uid}/posts`
//! - `PUT /users/{uid}/posts/{pid}`, `DELETE /users/{uid}/posts/{pid}`
//!
//! ## Operational endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::{Config, ConfigError, LogFormat};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::{AppState, AuthServiceImpl};
