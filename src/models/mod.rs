pub mod forecast;
pub mod random_source;
