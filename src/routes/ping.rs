use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Ping {
    pub status: String,
    pub time: DateTime<Utc>,
}

pub fn routes() -> Router {
    Router::new().route("/ping", get(get_ping))
}

async fn get_ping() -> Json<Ping> {
    Json(Ping {
        status: "ok".to_string(),
        time: Utc::now(),
    })
}
