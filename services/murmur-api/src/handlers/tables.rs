//! Table listing handler

use axum::extract::State;
use axum::Json;
use murmur_axum::RequestContext;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /tables/{uid} (owner only)
pub async fn list_tables(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Json<Vec<String>>> {
    if let Some(subject) = ctx.subject() {
        tracing::info!(subject = %subject, "listing tables");
    }
    let tables = state.query(&ctx, state.catalog.list_tables()).await?;
    Ok(Json(tables))
}
