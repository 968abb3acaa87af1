//! Request correlation layer.
//!
//! [`CorrelationLayer`] wraps the whole router. For every request it:
//! 1. takes the inbound `X-Request-ID` or generates one and writes it back
//!    onto the request, so `PropagateRequestIdLayer` echoes it;
//! 2. inserts a [`RequestContext`] into the request extensions;
//! 3. drives the inner service inside the context's `request` span;
//! 4. emits exactly one completion record when the response (or an error)
//!    comes back, plus the request counter and latency histogram.
//!
//! A request dropped before completion (client disconnect) is recorded
//! with status 499.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use axum::extract::ConnectInfo;
use http::{header, HeaderMap, HeaderValue, Method, Request, Response};
use pin_project_lite::pin_project;
use tokio::time::Instant;
use tower::{Layer, Service};
use tracing::Span;

use crate::context::{RequestContext, REQUEST_ID_HEADER};

/// Longest inbound correlation id accepted as-is
const MAX_REQUEST_ID_LEN: usize = 128;

/// Status recorded when the client goes away before a response exists
const CLIENT_CLOSED: u16 = 499;

/// Tower layer that correlates and records every request.
#[derive(Debug, Clone)]
pub struct CorrelationLayer {
    request_timeout: Duration,
}

impl CorrelationLayer {
    /// `request_timeout` bounds the per-request deadline carried in the context.
    #[must_use]
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl<S> Layer<S> for CorrelationLayer {
    type Service = CorrelationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationService {
            inner,
            request_timeout: self.request_timeout,
        }
    }
}

/// Service produced by [`CorrelationLayer`].
#[derive(Debug, Clone)]
pub struct CorrelationService<S> {
    inner: S,
    request_timeout: Duration,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorrelationService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = CorrelationFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let correlation_id = ensure_request_id(req.headers_mut());
        let ctx = RequestContext::new(correlation_id, self.request_timeout);
        let record = CompletionRecord::capture(&req, ctx.started_at());
        let span = ctx.span().clone();
        req.extensions_mut().insert(ctx);

        let future = {
            let _entered = span.enter();
            self.inner.call(req)
        };

        CorrelationFuture {
            inner: future,
            span,
            record: Some(record),
        }
    }
}

pin_project! {
    /// Response future for [`CorrelationService`].
    pub struct CorrelationFuture<F> {
        #[pin]
        inner: F,
        span: Span,
        record: Option<CompletionRecord>,
    }

    impl<F> PinnedDrop for CorrelationFuture<F> {
        fn drop(this: Pin<&mut Self>) {
            let this = this.project();
            if let Some(record) = this.record.take() {
                let _entered = this.span.enter();
                record.emit(CLIENT_CLOSED);
            }
        }
    }
}

impl<F, ResBody, E> Future for CorrelationFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();
        let result = ready!(this.inner.poll(cx));

        if let Some(record) = this.record.take() {
            let status = match &result {
                Ok(response) => response.status().as_u16(),
                Err(_) => 500,
            };
            record.emit(status);
        }

        Poll::Ready(result)
    }
}

/// Request attributes captured on the way in, logged on the way out.
#[derive(Debug)]
pub struct CompletionRecord {
    method: Method,
    path: String,
    query: String,
    ip: String,
    user_agent: String,
    started_at: Instant,
}

impl CompletionRecord {
    fn capture<B>(req: &Request<B>, started_at: Instant) -> Self {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().unwrap_or_default().to_string(),
            ip: client_ip(req.headers(), peer),
            user_agent: header_str(req.headers(), header::USER_AGENT.as_str())
                .unwrap_or_default()
                .to_string(),
            started_at,
        }
    }

    fn emit(self, status: u16) {
        let latency = self.started_at.elapsed();
        let latency_ms = latency.as_millis() as u64;

        tracing::info!(
            status,
            method = %self.method,
            path = %self.path,
            query = %self.query,
            ip = %self.ip,
            user_agent = %self.user_agent,
            latency_ms,
            "request"
        );

        let method = self.method.to_string();
        metrics::counter!(
            "http_requests_total",
            "method" => method.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds", "method" => method)
            .record(latency.as_secs_f64());
    }
}

/// Reuse a sane inbound `X-Request-ID`, otherwise generate one.
///
/// The header always ends up holding exactly the returned id, so the
/// echoed response header matches what was logged.
fn ensure_request_id(headers: &mut HeaderMap) -> String {
    let inbound = header_str(headers, REQUEST_ID_HEADER.as_str())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_owned);
    let id = inbound.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let current = headers.get(&REQUEST_ID_HEADER).map(HeaderValue::as_bytes);
    if current != Some(id.as_bytes()) {
        if let Ok(value) = HeaderValue::from_str(&id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
    }
    id
}

/// Client address: first `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return first.to_string();
        }
    }
    if let Some(real) = header_str(headers, "x-real-ip").map(str::trim) {
        if !real.is_empty() {
            return real.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
