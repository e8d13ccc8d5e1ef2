use axum::{Json, Router, extract::State, routing::get};

use crate::app::AppState;
use crate::error::InternalError;
use crate::models::forecast::{ForecastRecord, generate};
use crate::models::random_source::request_rng;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/weatherforecast", get(get_forecast))
        .with_state(state)
}

async fn get_forecast(
    State(state): State<AppState>,
) -> Result<Json<Vec<ForecastRecord>>, InternalError> {
    let today = (state.today)();
    let mut rng = request_rng(state.seed)?;
    let forecast = generate(today, &mut rng)?;
    log::debug!(
        "Generated {} forecast records following {}",
        forecast.len(),
        today
    );
    Ok(Json(forecast))
}
