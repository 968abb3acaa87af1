//! Account handlers

use axum::extract::{Path, State};
use axum::Json;
use murmur_axum::RequestContext;
use murmur_types::{Account, AccountChanges, AccountId, NewAccount};

use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiJson;
use crate::state::AppState;

/// GET /users
pub async fn list_accounts(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.query(&ctx, state.accounts.list()).await?;
    Ok(Json(accounts))
}

/// GET /users/{uid}
pub async fn get_account(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uid): Path<String>,
) -> ApiResult<Json<Account>> {
    let id = AccountId::parse(&uid)?;
    let account = find_account(&state, &ctx, id).await?;
    Ok(Json(account))
}

/// POST /users
pub async fn create_account(
    State(state): State<AppState>,
    ctx: RequestContext,
    ApiJson(input): ApiJson<NewAccount>,
) -> ApiResult<Json<Account>> {
    if input.username.is_empty() {
        return Err(ApiError::BadRequest("username is empty".to_string()));
    }
    if input.password.is_empty() {
        return Err(ApiError::BadRequest("password is empty".to_string()));
    }

    let account = state.query(&ctx, state.accounts.create(input)).await?;
    tracing::info!(account_id = %account.id, "account created");
    Ok(Json(account))
}

/// PUT /users/{uid} (owner only)
pub async fn update_account(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uid): Path<String>,
    ApiJson(changes): ApiJson<AccountChanges>,
) -> ApiResult<Json<Account>> {
    let id = AccountId::parse(&uid)?;
    let mut account = find_account(&state, &ctx, id).await?;

    changes.merge_into(&mut account);
    let account = state.query(&ctx, state.accounts.update(&account)).await?;
    Ok(Json(account))
}

/// DELETE /users/{uid} (owner only); responds with the deleted record
pub async fn delete_account(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uid): Path<String>,
) -> ApiResult<Json<Account>> {
    let id = AccountId::parse(&uid)?;
    let account = find_account(&state, &ctx, id).await?;

    state.query(&ctx, state.accounts.delete(id)).await?;
    tracing::info!(account_id = %id, "account deleted");
    Ok(Json(account))
}

async fn find_account(state: &AppState, ctx: &RequestContext, id: AccountId) -> ApiResult<Account> {
    state
        .query(ctx, state.accounts.find_by_id(id))
        .await?
        .ok_or(ApiError::NotFound("account"))
}
