//! Data models for locations, current conditions, and log rows

pub mod condition;
pub mod location;
pub mod weather;

pub use condition::describe_weather_code;
pub use location::Location;
pub use weather::{CurrentConditions, Observation};
