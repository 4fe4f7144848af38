//! Request spans and metrics, `/health`, `/metrics`, and response headers.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::api::{ApiError, AppState};
use crate::constants::routes;

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
    Ok("OK")
}

/// How a request ended, as seen by the operator's browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A rendered page, JSON ack or static file.
    Served,
    /// Redirect-after-write back to a page.
    Redirected,
    /// Sent to the login form: gate bounce, failed login, logout.
    ToLogin,
    Rejected,
    Failed,
}

impl RequestOutcome {
    #[must_use]
    pub fn classify(response: &Response) -> Self {
        let status = response.status();

        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else if status.is_redirection() {
            let to_login = response
                .headers()
                .get(header::LOCATION)
                .is_some_and(|location| location == routes::LOGIN);
            if to_login { Self::ToLogin } else { Self::Redirected }
        } else {
            Self::Served
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Served => "served",
            Self::Redirected => "redirected",
            Self::ToLogin => "to_login",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

/// Opens the `request` span (the session gate fills in `user_id`) and
/// records one `http_requests_total` sample per route and outcome.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    // Only mounted with `route_layer`, so the route is always matched.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |p| p.as_str().to_string());
    let method = req.method().clone();

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = %route,
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let outcome = RequestOutcome::classify(&response);
        let elapsed = started.elapsed();

        let labels = [
            ("method", method.to_string()),
            ("route", route),
            ("outcome", outcome.as_str().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let status = response.status().as_u16();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if outcome == RequestOutcome::Failed {
            warn!(status, elapsed_ms, outcome = outcome.as_str(), "Request failed");
        } else {
            info!(status, elapsed_ms, outcome = outcome.as_str(), "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; img-src 'self' data:; \
    style-src 'self' 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'; base-uri 'self'";

const HARDENING_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "same-origin"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// Adds the hardening headers everywhere. HTML pages carry student records,
/// so they are also marked `no-store`.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));

    let headers = response.headers_mut();
    for (name, value) in HARDENING_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    if is_html {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, http::StatusCode, response::Html, response::Redirect};

    #[test]
    fn test_redirects_to_login_are_told_apart() {
        let to_login = Redirect::to(routes::LOGIN).into_response();
        assert_eq!(RequestOutcome::classify(&to_login), RequestOutcome::ToLogin);

        let back = Redirect::to(routes::DASHBOARD).into_response();
        assert_eq!(RequestOutcome::classify(&back), RequestOutcome::Redirected);
    }

    #[test]
    fn test_classify_status_classes() {
        let page = Html("<p>ok</p>").into_response();
        assert_eq!(RequestOutcome::classify(&page), RequestOutcome::Served);

        let ack = Json(serde_json::json!({ "success": true })).into_response();
        assert_eq!(RequestOutcome::classify(&ack), RequestOutcome::Served);

        let bad = StatusCode::BAD_REQUEST.into_response();
        assert_eq!(RequestOutcome::classify(&bad), RequestOutcome::Rejected);

        let boom = ApiError::internal("boom").into_response();
        assert_eq!(RequestOutcome::classify(&boom), RequestOutcome::Failed);
    }
}
