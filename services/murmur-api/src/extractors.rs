//! Request extractors

use std::convert::Infallible;

use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::Deserialize;

use crate::error::ApiError;

/// JSON body whose rejections render as `ApiError` (400 `BAD_REQUEST`)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginFields {
    u: Option<String>,
    p: Option<String>,
}

impl LoginFields {
    /// Body values win over query values of the same name
    fn overlay(self, body: LoginFields) -> Self {
        Self {
            u: body.u.or(self.u),
            p: body.p.or(self.p),
        }
    }
}

/// Login credentials from the query string and the request body
///
/// The body may be urlencoded or multipart. Any other (or missing)
/// content type contributes nothing. Extraction never fails: absent
/// fields are empty strings and fail credential verification.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub u: String,
    pub p: String,
}

impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<LoginFields>::try_from_uri(req.uri())
            .map(|Query(fields)| fields)
            .unwrap_or_default();

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<LoginFields>::from_request(req, state).await {
                Ok(Form(fields)) => fields,
                Err(err) => {
                    tracing::debug!(error = %err, "unreadable login form");
                    LoginFields::default()
                }
            }
        } else if content_type.starts_with("multipart/form-data") {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(err) => {
                    tracing::debug!(error = %err, "unreadable multipart login");
                    LoginFields::default()
                }
            }
        } else {
            LoginFields::default()
        };

        let fields = query.overlay(body);
        Ok(Self {
            u: fields.u.unwrap_or_default(),
            p: fields.p.unwrap_or_default(),
        })
    }
}

async fn read_multipart(mut multipart: Multipart) -> LoginFields {
    let mut fields = LoginFields::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(error = %err, "truncated multipart login");
                break;
            }
        };
        let name = field.name().map(str::to_owned);
        let Ok(value) = field.text().await else {
            break;
        };
        match name.as_deref() {
            Some("u") if fields.u.is_none() => fields.u = Some(value),
            Some("p") if fields.p.is_none() => fields.p = Some(value),
            _ => {}
        }
    }
    fields
}
