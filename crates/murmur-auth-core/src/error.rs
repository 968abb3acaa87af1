//! Auth errors

use thiserror::Error;

use crate::store::StoreError;

/// Authentication and authorization failures
///
/// Every variant is terminal for the request that produced it.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username or wrong password (deliberately indistinguishable)
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No `Authorization` header, or not a `Bearer` credential
    #[error("no authorization token found in the header")]
    MissingOrMalformedToken,

    /// Token was never issued or has outlived its lifetime
    #[error("invalid token")]
    InvalidOrExpiredToken,

    /// Valid token, but for a different subject than the route's owner
    #[error("user unauthenticated")]
    IdentityMismatch,

    /// Session store could not be reached; the token may still be valid
    #[error("session store unavailable: {0}")]
    SessionStoreUnavailable(String),

    /// Resource store failed while reading accounts
    #[error("resource store unavailable: {0}")]
    ResourceStoreUnavailable(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingOrMalformedToken => 400,
            Self::InvalidCredentials | Self::InvalidOrExpiredToken | Self::IdentityMismatch => 401,
            Self::SessionStoreUnavailable(_) | Self::ResourceStoreUnavailable(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingOrMalformedToken => "MISSING_OR_MALFORMED_TOKEN",
            Self::InvalidOrExpiredToken => "INVALID_OR_EXPIRED_TOKEN",
            Self::IdentityMismatch => "IDENTITY_MISMATCH",
            Self::SessionStoreUnavailable(_) => "SESSION_STORE_UNAVAILABLE",
            Self::ResourceStoreUnavailable(_) => "RESOURCE_STORE_UNAVAILABLE",
        }
    }

    /// Infrastructure failures a client may retry with the same credentials
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SessionStoreUnavailable(_) | Self::ResourceStoreUnavailable(_)
        )
    }
}

impl From<murmur_db::DbError> for AuthError {
    fn from(err: murmur_db::DbError) -> Self {
        tracing::error!("Resource store error: {}", err);
        Self::ResourceStoreUnavailable(err.to_string())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Session store error: {}", err);
        Self::SessionStoreUnavailable(err.to_string())
    }
}
