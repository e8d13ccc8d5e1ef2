pub mod forecast;
pub mod healthz;
pub mod ping;
