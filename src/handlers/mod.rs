pub mod car;
pub mod engine;
pub mod health;
pub mod login;
pub mod metrics;

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::require_bearer_token;
use crate::metrics::track_metrics;
use crate::state::AppState;

/// Full application router. `/login`, `/health` and `/metrics` are open;
/// everything under `/cars` and `/engines` needs a bearer token.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .merge(car::router())
        .merge(engine::router())
        .route_layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            require_bearer_token,
        ));

    Router::new()
        .merge(protected)
        .merge(login::router())
        .merge(health::router())
        .merge(metrics::router())
        .layer(TimeoutLayer::new(request_timeout))
        // Outside the timeout: 408 responses are counted.
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
