//! Request context.
//!
//! A [`RequestContext`] is created by the correlation layer for each inbound
//! request and never shared across requests. It is immutable: the
//! authorization middleware derives an extended copy via
//! [`RequestContext::with_subject`] and reinserts it.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use http::HeaderName;
use murmur_types::AccountId;
use tokio::time::Instant;
use tracing::Span;

/// Inbound/outbound correlation header
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request budget used when no layer supplied one
const DETACHED_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request correlation, timing and identity.
#[derive(Debug, Clone)]
pub struct RequestContext {
    correlation_id: Arc<str>,
    started_at: Instant,
    deadline: Instant,
    span: Span,
    subject: Option<AccountId>,
}

impl RequestContext {
    /// Start a context for `correlation_id` with `timeout` as the whole-request budget.
    #[must_use]
    pub fn new(correlation_id: impl Into<Arc<str>>, timeout: Duration) -> Self {
        let correlation_id = correlation_id.into();
        let started_at = Instant::now();
        let span = tracing::info_span!("request", request_id = %correlation_id);

        Self {
            correlation_id,
            started_at,
            deadline: started_at + timeout,
            span,
            subject: None,
        }
    }

    /// Context for a request that bypassed the correlation layer.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), DETACHED_TIMEOUT)
    }

    /// Copy of this context carrying the authenticated subject.
    #[must_use]
    pub fn with_subject(&self, subject: AccountId) -> Self {
        Self {
            subject: Some(subject),
            ..self.clone()
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Instant after which store calls made for this request are abandoned.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// The `request` span every log line of this request is recorded under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn subject(&self) -> Option<AccountId> {
        self.subject
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(RequestContext::detached))
    }
}
