use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::metrics::{Metrics, RequestCounts};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub metrics: RequestCounts,
}

pub fn routes(metrics: Arc<Metrics>) -> Router {
    Router::new()
        .route("/healthz", get(get_health))
        .with_state(metrics)
}

async fn get_health(State(metrics): State<Arc<Metrics>>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: metrics.uptime().as_secs_f64(),
        metrics: metrics.counts(),
    })
}
