//! Murmur Auth Core - Authentication business logic
//!
//! The session pipeline without any HTTP types:
//! - [`CredentialVerifier`] checks username/password against the resource store
//! - [`TokenIssuer`] mints opaque bearer tokens bound to a subject in a [`SessionStore`]
//! - [`Authorizer`] resolves a bearer token and enforces the owner-match check
//! - [`AuthService`] ties the three together

pub mod authorize;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod service;
pub mod store;
pub mod token;

pub use authorize::{bearer_token, Authorizer};
pub use config::AuthConfig;
pub use credentials::CredentialVerifier;
pub use crypto::{constant_time_eq, constant_time_str_eq, token_fingerprint};
pub use error::AuthError;
pub use service::AuthService;
pub use store::{
    MemorySessionStore, RedisSessionStore, RedisSettings, SessionStore, StoreError, StoreResult,
};
pub use token::{IssuedSession, TokenIssuer};
