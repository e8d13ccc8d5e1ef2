use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::models::forecast::ForecastError;
use crate::models::random_source::RandomSourceError;

/// A failure the handler cannot recover from.
///
/// The client only ever sees a bare 500, the message goes to the log.
pub struct InternalError {
    pub message: String,
}

impl InternalError {
    pub fn new(message: String) -> InternalError {
        InternalError { message }
    }
}

impl From<ForecastError> for InternalError {
    fn from(error: ForecastError) -> Self {
        InternalError::new(format!("failed to generate forecast: {}", error))
    }
}

impl From<RandomSourceError> for InternalError {
    fn from(error: RandomSourceError) -> Self {
        InternalError::new(format!("failed to set up random source: {}", error))
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        // Logged here so handlers can just use `?`.
        error!(
            "Error encountered while processing request: {}",
            self.message
        );
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
