use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::logger::{TraceId, annotate_request, root_span};

const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

/// Baseline hardening headers plus an open CORS policy; the API is public
/// and read-only.
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;

    let headers = res.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(CROSS_ORIGIN_RESOURCE_POLICY, HeaderValue::from_static("same-origin"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    res
}

/// Runs each request inside a root span carrying a fresh trace id.
pub async fn trace_request(req: Request, next: Next) -> Response {
    let trace_id = TraceId::generate();
    let span = root_span("http_request", &trace_id);
    annotate_request(&span, req.method().as_str(), req.uri().path());

    let start = Instant::now();
    let res = next.run(req).instrument(span.clone()).await;

    span.record("status", res.status().as_u16());
    tracing::info!(
        parent: &span,
        elapsed_ms = start.elapsed().as_millis() as u64,
        status = res.status().as_u16(),
        "request completed"
    );

    res
}
