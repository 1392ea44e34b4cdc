//! Weather API client for Open-Meteo integration
//!
//! HTTP client functionality for resolving place names via the Open-Meteo
//! geocoding API and retrieving current conditions from the Open-Meteo
//! forecast API. Both endpoints are free and require no API key.

use crate::config::WeatherLogConfig;
use crate::models::{CurrentConditions, Location};
use crate::{Result, WeatherLogError};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = concat!("weatherlog/", env!("CARGO_PKG_VERSION"));

/// Client for the geocoding and weather endpoints
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Base URL of the geocoding API
    geocoding_base_url: String,
    /// Base URL of the weather API
    weather_base_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherLogConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherLogError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding.base_url.clone(),
            weather_base_url: config.weather.base_url.clone(),
        })
    }

    /// Resolve a place name to its single best geocoding match
    #[instrument(skip(self))]
    pub fn geocode(&self, query: &str) -> Result<Location> {
        info!("Geocoding place: '{}'", query);

        let url = self.build_search_url(query);
        debug!("Geocoding request URL: {}", url);

        let response: open_meteo::GeocodingResponse = self.get_json(&url)?;

        let candidate = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("No geocoding results for '{}'", query);
                WeatherLogError::not_found(query)
            })?;

        let display_name =
            Location::compose_display_name(&candidate.name, candidate.country.as_deref());
        info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query, display_name, candidate.latitude, candidate.longitude
        );

        Ok(Location::new(
            query.to_string(),
            candidate.latitude,
            candidate.longitude,
            display_name,
        ))
    }

    /// Fetch current conditions for a coordinate pair
    #[instrument(skip(self))]
    pub fn current_conditions(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        info!(
            "Fetching current conditions for {:.4}, {:.4}",
            latitude, longitude
        );

        let url = self.build_forecast_url(latitude, longitude);
        debug!("Weather request URL: {}", url);

        let response: open_meteo::ForecastResponse = self.get_json(&url)?;

        let current = response.current.ok_or_else(|| {
            WeatherLogError::upstream("no current weather block in response")
        })?;

        Ok(CurrentConditions {
            temperature_c: current.temperature,
            humidity_pct: current.relative_humidity,
            wind_kmh: current.wind_speed,
            weather_code: current.weather_code,
        })
    }

    /// Build the geocoding search URL for a query
    fn build_search_url(&self, query: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(query)
        )
    }

    /// Build the forecast URL for a coordinate pair
    ///
    /// Open-Meteo metric defaults apply: Celsius, percent, km/h.
    fn build_forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&current=temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code&timezone=auto",
            self.weather_base_url
        )
    }

    /// Perform one GET request and deserialize the JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WeatherLogError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherLogError::upstream(format!("HTTP {status}")));
        }

        response
            .json()
            .map_err(|e| WeatherLogError::upstream(format!("invalid JSON body: {e}")))
    }
}

/// Open-Meteo API response structures
mod open_meteo {
    use serde::Deserialize;

    /// Geocoding response; `results` is absent entirely when nothing matches
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingCandidate>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingCandidate {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    /// Forecast response, reduced to the current-conditions block
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        #[serde(rename = "relative_humidity_2m")]
        pub relative_humidity: u8,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: f64,
        pub weather_code: u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WeatherApiClient {
        WeatherApiClient::new(&WeatherLogConfig::default()).unwrap()
    }

    #[test]
    fn test_build_search_url_encodes_query() {
        let url = test_client().build_search_url("London, UK");
        assert!(url.starts_with("https://geocoding-api.open-meteo.com/v1/search?"));
        assert!(url.contains("name=London%2C%20UK"));
        assert!(url.contains("count=1"));
    }

    #[test]
    fn test_build_forecast_url_requests_current_fields() {
        let url = test_client().build_forecast_url(51.5, -0.12);
        assert!(url.contains("latitude=51.5"));
        assert!(url.contains("longitude=-0.12"));
        assert!(url.contains(
            "current=temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code"
        ));
        assert!(url.contains("timezone=auto"));
    }

    #[test]
    fn test_geocoding_response_without_results_field() {
        let response: open_meteo::GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_current_data_field_mapping() {
        let body = r#"{
            "current": {
                "time": "2026-08-06T14:00",
                "temperature_2m": 18.3,
                "relative_humidity_2m": 60,
                "wind_speed_10m": 12.0,
                "weather_code": 2
            }
        }"#;
        let response: open_meteo::ForecastResponse = serde_json::from_str(body).unwrap();
        let current = response.current.unwrap();
        assert_eq!(current.temperature, 18.3);
        assert_eq!(current.relative_humidity, 60);
        assert_eq!(current.weather_code, 2);
    }
}
