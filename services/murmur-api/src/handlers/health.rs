//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use murmur_axum::RequestContext;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    pub database: CheckResult,
    pub sessions: CheckResult,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    pub latency_ms: u64,
}

impl CheckResult {
    fn from_outcome(ok: bool, started: Instant) -> Self {
        Self {
            status: if ok { "ok" } else { "error" },
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// GET /hello
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "hello world" }))
}

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "murmur-api",
    })
}

/// GET /ready - Readiness probe (resource store and session store)
pub async fn ready(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> (StatusCode, Json<ReadyResponse>) {
    let started = Instant::now();
    let db_ok = state.query(&ctx, state.catalog.ping()).await.is_ok();
    let database = CheckResult::from_outcome(db_ok, started);

    let started = Instant::now();
    let sessions_ok = state.auth.check_session_store(ctx.deadline()).await.is_ok();
    let sessions = CheckResult::from_outcome(sessions_ok, started);

    let ready = database.is_ok() && sessions.is_ok();
    if !ready {
        tracing::warn!(database = database.status, sessions = sessions.status, "not ready");
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if ready { "ready" } else { "unavailable" },
            service: "murmur-api",
            checks: ReadyChecks { database, sessions },
        }),
    )
}
