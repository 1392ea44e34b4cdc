//! Current-conditions reading and the log row derived from it

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::condition::describe_weather_code;
use crate::models::Location;

/// One current-conditions reading for a coordinate pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: u8,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// WMO weather code
    pub weather_code: u8,
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1} °C", self.temperature_c)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} km/h", self.wind_kmh)
    }
}

/// One row of the weather log
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Observation {
    /// Local wall-clock time the reading was taken, "%Y-%m-%d %H:%M:%S"
    pub timestamp: String,
    /// Resolved display name of the place
    pub place: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: u8,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// Human-readable weather condition
    pub condition: String,
}

impl Observation {
    /// Combine a reading with its location and translate the weather code
    #[must_use]
    pub fn from_conditions(
        taken_at: DateTime<Local>,
        location: &Location,
        current: &CurrentConditions,
    ) -> Self {
        Self {
            timestamp: taken_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            place: location.display_name.clone(),
            temperature_c: current.temperature_c,
            humidity_pct: current.humidity_pct,
            wind_kmh: current.wind_kmh,
            condition: describe_weather_code(current.weather_code).to_string(),
        }
    }

    /// Fields in log-column order, formatted as they are persisted
    #[must_use]
    pub fn csv_record(&self) -> [String; 6] {
        [
            self.timestamp.clone(),
            self.place.clone(),
            format!("{:.1}", self.temperature_c),
            self.humidity_pct.to_string(),
            format!("{:.1}", self.wind_kmh),
            self.condition.clone(),
        ]
    }
}
