//! Request metrics exposed in Prometheus text format at `/metrics`.
//!
//! The registry is an ordinary value built at startup and shared through
//! [`AppState`](crate::state::AppState); nothing is registered globally, so
//! every test server gets its own counters.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// `path` label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

pub struct HttpMetrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: HistogramVec,
    responses: IntCounterVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of http requests"),
            &["path", "method"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "http_requests_duration_seconds",
                "Duration of http requests in seconds",
            ),
            &["path", "method"],
        )?;
        let responses = IntCounterVec::new(
            Opts::new(
                "http_response_total",
                "Total number of http responses by status code",
            ),
            &["path", "method", "status_code"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(responses.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration,
            responses,
        })
    }

    pub fn observe(&self, path: &str, method: &str, status: StatusCode, elapsed: Duration) {
        self.requests.with_label_values(&[path, method]).inc();
        self.duration
            .with_label_values(&[path, method])
            .observe(elapsed.as_secs_f64());
        self.responses
            .with_label_values(&[path, method, status.as_str()])
            .inc();
    }

    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Records every request. The `path` label is the route template
/// (`/cars/:id`), or [`UNMATCHED_PATH`] when no route matched, so the
/// series count stays bounded by the route table.
pub async fn track_metrics(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics.observe(&path, method.as_str(), response.status(), start.elapsed());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_contains_observed_series() {
        let metrics = HttpMetrics::new().unwrap();
        metrics.observe("/cars/:id", "GET", StatusCode::OK, Duration::from_millis(5));
        metrics.observe("/cars/:id", "GET", StatusCode::NOT_FOUND, Duration::from_millis(3));

        let text = metrics.render().unwrap();
        assert!(has_sample(&text, "http_requests_total", &[r#"path="/cars/:id""#], "2"));
        assert!(has_sample(
            &text,
            "http_response_total",
            &[r#"path="/cars/:id""#, r#"status_code="404""#],
            "1"
        ));
        assert!(text.contains("http_requests_duration_seconds_bucket"));
    }

    fn has_sample(text: &str, name: &str, labels: &[&str], value: &str) -> bool {
        text.lines().any(|line| {
            line.starts_with(&format!("{}{{", name))
                && labels.iter().all(|label| line.contains(label))
                && line.ends_with(&format!(" {}", value))
        })
    }

    #[test]
    fn registries_are_independent() {
        let first = HttpMetrics::new().unwrap();
        let second = HttpMetrics::new().unwrap();
        first.observe("/login", "POST", StatusCode::OK, Duration::from_millis(1));

        assert!(!second.render().unwrap().contains("/login"));
    }
}
