//! Login handler

use axum::extract::State;
use axum::Json;
use murmur_auth_core::AuthError;
use murmur_axum::RequestContext;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::LoginForm;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    form: LoginForm,
) -> ApiResult<Json<TokenResponse>> {
    tracing::info!(username = %form.u, "login attempt");

    match state.auth.login(&form.u, &form.p, ctx.deadline()).await {
        Ok(session) => {
            metrics::counter!("murmur_logins_total", "outcome" => "success").increment(1);
            tracing::info!(subject = %session.subject, "login succeeded");
            Ok(Json(TokenResponse {
                token: session.token,
            }))
        }
        Err(err) => {
            let outcome = match err {
                AuthError::InvalidCredentials => "rejected",
                _ => "error",
            };
            metrics::counter!("murmur_logins_total", "outcome" => outcome).increment(1);
            Err(err.into())
        }
    }
}
