//! Location model for geocoded places

use serde::{Deserialize, Serialize};

/// A place name resolved to geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// The free-text query this location was resolved from
    pub query: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Resolved display name (e.g. "London, United Kingdom")
    pub display_name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(query: String, latitude: f64, longitude: f64, display_name: String) -> Self {
        Self {
            query,
            latitude,
            longitude,
            display_name,
        }
    }

    /// Compose the display name from a candidate name and an optional country
    #[must_use]
    pub fn compose_display_name(name: &str, country: Option<&str>) -> String {
        match country {
            Some(country) if !country.is_empty() => format!("{name}, {country}"),
            _ => name.to_string(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
