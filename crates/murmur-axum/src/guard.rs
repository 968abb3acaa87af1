//! Owner-scoped authorization middleware.
//!
//! Mount with `route_layer` so the route's path parameters are available:
//!
//! ```ignore
//! Router::new()
//!     .route("/users/{uid}", put(update_account))
//!     .route_layer(middleware::from_fn_with_state(auth, require_owner));
//! ```
//!
//! The handler only runs when the session behind the bearer token belongs
//! to the account named by `{uid}`. Any failure returns the rejection
//! response directly and the handler is never invoked.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header;
use murmur_auth_core::{AuthService, SessionStore};
use murmur_db::AccountRepository;

use crate::context::RequestContext;
use crate::error::AuthRejection;

/// Path parameter naming the resource owner
pub const OWNER_PARAM: &str = "uid";

/// Authorize the request for the owner in the `{uid}` path segment.
///
/// On success the [`RequestContext`] in the request extensions is replaced
/// by one carrying the authenticated subject.
pub async fn require_owner<A, S>(
    State(auth): State<Arc<AuthService<A, S>>>,
    Path(params): Path<HashMap<String, String>>,
    ctx: RequestContext,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection>
where
    A: AccountRepository + ?Sized + 'static,
    S: SessionStore + ?Sized + 'static,
{
    let owner = params.get(OWNER_PARAM).map(String::as_str).unwrap_or_default();
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let subject = auth
        .authorize(authorization, owner, ctx.deadline())
        .await?;

    tracing::debug!(subject = %subject, "request authorized");
    req.extensions_mut().insert(ctx.with_subject(subject));

    Ok(next.run(req).await)
}
