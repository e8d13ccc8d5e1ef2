use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::metrics::{Metrics, track_requests};
use crate::routes;

// Anything that goes in here must be cheap to clone. Each request builds its
// own random generator so nothing mutable is shared between handlers except
// the atomic request counters.
#[derive(Clone)]
pub struct AppState {
    /// Source of the current calendar date.
    pub today: fn() -> NaiveDate,
    /// When set, every request draws from a generator seeded with this value.
    pub seed: Option<u64>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(seed: Option<u64>) -> AppState {
        AppState {
            today: local_today,
            seed,
            metrics: Arc::new(Metrics::new()),
        }
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Cross-origin access for browser clients.
///
/// `*` allows every origin. Otherwise only the listed origins are echoed
/// back, and an empty list grants no cross-origin access at all.
pub fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(routes::forecast::routes(state.clone()))
        .merge(routes::ping::routes())
        .merge(routes::healthz::routes(state.metrics.clone()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ))
        .layer(TraceLayer::new_for_http())
}
