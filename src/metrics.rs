use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// In-memory request counters, shared by every handler through an `Arc`.
#[derive(Debug)]
pub struct Metrics {
    started_at: Instant,
    total_requests: AtomicU64,
    active_requests: AtomicU64,
    total_4xx: AtomicU64,
    total_5xx: AtomicU64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestCounts {
    pub total_requests: u64,
    pub active_requests: u64,
    pub total_4xx: u64,
    pub total_5xx: u64,
}

/// Marks a request as active until dropped.
pub struct ActiveRequest<'a> {
    metrics: &'a Metrics,
}

impl Drop for ActiveRequest<'_> {
    fn drop(&mut self) {
        self.metrics.active_requests.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Metrics {
    pub fn new() -> Metrics {
        Metrics {
            started_at: Instant::now(),
            total_requests: AtomicU64::new(0),
            active_requests: AtomicU64::new(0),
            total_4xx: AtomicU64::new(0),
            total_5xx: AtomicU64::new(0),
        }
    }

    pub fn start_request(&self) -> ActiveRequest<'_> {
        self.active_requests.fetch_add(1, Ordering::Relaxed);
        ActiveRequest { metrics: self }
    }

    pub fn finish_request(&self, status: StatusCode) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if status.is_client_error() {
            self.total_4xx.fetch_add(1, Ordering::Relaxed);
        } else if status.is_server_error() {
            self.total_5xx.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn counts(&self) -> RequestCounts {
        RequestCounts {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            active_requests: self.active_requests.load(Ordering::Relaxed),
            total_4xx: self.total_4xx.load(Ordering::Relaxed),
            total_5xx: self.total_5xx.load(Ordering::Relaxed),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics::new()
    }
}

pub async fn track_requests(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let _active = metrics.start_request();
    let response = next.run(request).await;
    metrics.finish_request(response.status());
    response
}
