pub mod app;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;

pub use models::forecast::{
    FORECAST_DAYS, ForecastError, ForecastRecord, MAX_TEMPERATURE_CELSIUS,
    MIN_TEMPERATURE_CELSIUS, Summary, fahrenheit_from_celsius, generate,
};
pub use models::random_source::{RandomSource, RandomSourceError, request_rng};
