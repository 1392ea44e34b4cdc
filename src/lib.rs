//! weatherlog - current conditions lookup with a persistent CSV logbook
//!
//! This library resolves a free-text place name to coordinates via the
//! Open-Meteo geocoding API, fetches current conditions for them, and
//! appends the result to an append-only CSV log file.

pub mod api;
pub mod config;
pub mod error;
pub mod logbook;
pub mod models;
pub mod pipeline;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::WeatherLogConfig;
pub use error::WeatherLogError;
pub use logbook::Logbook;
pub use models::{describe_weather_code, CurrentConditions, Location, Observation};
pub use pipeline::{Pipeline, RunState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherLogError>;
