//! Router assembly

use axum::middleware;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use murmur_axum::{require_owner, CorrelationLayer};
use tower::ServiceBuilder;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full application router.
///
/// Layer order, outermost first: correlation, request-id propagation,
/// timeout (API routes only), router.
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Owner-only routes; the guard runs after routing so it can read `{uid}`
    let guarded = Router::new()
        .route("/tables/{uid}", get(handlers::list_tables))
        .route(
            "/users/{uid}",
            axum::routing::put(handlers::update_account).delete(handlers::delete_account),
        )
        .route("/users/{uid}/posts", axum::routing::post(handlers::create_post))
        .route(
            "/users/{uid}/posts/{pid}",
            axum::routing::put(handlers::update_post).delete(handlers::delete_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_owner::<dyn murmur_db::AccountRepository, dyn murmur_auth_core::SessionStore>,
        ));

    let public = Router::new()
        .route("/hello", get(handlers::hello))
        .route("/login", axum::routing::post(handlers::login))
        .route(
            "/users",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route("/users/{uid}", get(handlers::get_account))
        .route("/users/{uid}/posts", get(handlers::list_posts))
        .route("/users/{uid}/posts/{pid}", get(handlers::get_post));

    let api = public
        .merge(guarded)
        .layer(TimeoutLayer::new(request_timeout));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let middleware = ServiceBuilder::new()
        .layer(CorrelationLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .merge(api)
        .merge(health_routes)
        .merge(metrics_route)
        .layer(middleware)
        .with_state(state)
}
