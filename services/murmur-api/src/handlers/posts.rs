//! Post handlers
//!
//! Every post route is scoped to the `{uid}` owner; a post id that exists
//! under a different owner is reported as not found.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use murmur_axum::RequestContext;
use murmur_types::{AccountId, NewPost, Post, PostChanges, PostId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiJson;
use crate::state::AppState;

fn owner_and_post(params: &HashMap<String, String>) -> ApiResult<(AccountId, PostId)> {
    let owner = AccountId::parse(params.get("uid").map(String::as_str).unwrap_or_default())?;
    let post = PostId::parse(params.get("pid").map(String::as_str).unwrap_or_default())?;
    Ok((owner, post))
}

/// GET /users/{uid}/posts
pub async fn list_posts(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uid): Path<String>,
) -> ApiResult<Json<Vec<Post>>> {
    let owner = AccountId::parse(&uid)?;
    let posts = state.query(&ctx, state.posts.list_by_owner(owner)).await?;
    Ok(Json(posts))
}

/// GET /users/{uid}/posts/{pid}
pub async fn get_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(params): Path<HashMap<String, String>>,
) -> ApiResult<Json<Post>> {
    let (owner, id) = owner_and_post(&params)?;
    let post = find_post(&state, &ctx, owner, id).await?;
    Ok(Json(post))
}

/// POST /users/{uid}/posts (owner only)
pub async fn create_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uid): Path<String>,
    ApiJson(input): ApiJson<NewPost>,
) -> ApiResult<Json<Post>> {
    let owner = AccountId::parse(&uid)?;
    let post = state.query(&ctx, state.posts.create(owner, input)).await?;
    tracing::info!(post_id = %post.id, owner = %owner, "post created");
    Ok(Json(post))
}

/// PUT /users/{uid}/posts/{pid} (owner only)
pub async fn update_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(params): Path<HashMap<String, String>>,
    ApiJson(changes): ApiJson<PostChanges>,
) -> ApiResult<Json<Post>> {
    let (owner, id) = owner_and_post(&params)?;
    let mut post = find_post(&state, &ctx, owner, id).await?;

    changes.merge_into(&mut post);
    let post = state.query(&ctx, state.posts.update(&post)).await?;
    Ok(Json(post))
}

/// DELETE /users/{uid}/posts/{pid} (owner only); responds with the deleted record
pub async fn delete_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(params): Path<HashMap<String, String>>,
) -> ApiResult<Json<Post>> {
    let (owner, id) = owner_and_post(&params)?;
    let post = find_post(&state, &ctx, owner, id).await?;

    state.query(&ctx, state.posts.delete(id)).await?;
    Ok(Json(post))
}

async fn find_post(
    state: &AppState,
    ctx: &RequestContext,
    owner: AccountId,
    id: PostId,
) -> ApiResult<Post> {
    state
        .query(ctx, state.posts.find(owner, id))
        .await?
        .ok_or(ApiError::NotFound("post"))
}
