//! Run pipeline: resolve a place, fetch conditions, render, persist
//!
//! One run walks Idle → Resolving → Fetching → Rendering → Saving → Done.
//! Failed is terminal and reached when geocoding or the weather fetch
//! errors; nothing is logged on that path. A failed save still leaves the
//! rendered summary standing, but the error propagates to the caller.

use crate::api::WeatherApiClient;
use crate::logbook::Logbook;
use crate::models::Observation;
use crate::{Result, WeatherLogError};
use chrono::Local;
use std::io::Write;
use tracing::{error, info};

/// States of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Fetching,
    Rendering,
    Saving,
    Done,
    Failed,
}

/// One-shot pipeline from place name to console summary and log row
pub struct Pipeline {
    api: WeatherApiClient,
    logbook: Logbook,
    state: RunState,
}

impl Pipeline {
    /// Create a pipeline over the given client and logbook
    #[must_use]
    pub fn new(api: WeatherApiClient, logbook: Logbook) -> Self {
        Self {
            api,
            logbook,
            state: RunState::Idle,
        }
    }

    /// Current state of the pipeline
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute one full run for a place-name query
    pub fn run<W: Write>(&mut self, query: &str, out: &mut W) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            self.state = RunState::Failed;
            return Err(WeatherLogError::validation("place name must not be empty"));
        }

        self.state = RunState::Resolving;
        let location = match self.api.geocode(query) {
            Ok(location) => location,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e);
            }
        };

        self.state = RunState::Fetching;
        let current = match self
            .api
            .current_conditions(location.latitude, location.longitude)
        {
            Ok(current) => current,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e);
            }
        };

        self.state = RunState::Rendering;
        let observation = Observation::from_conditions(Local::now(), &location, &current);
        render_summary(&observation, out)?;

        self.state = RunState::Saving;
        let saved = self.logbook.append(&observation);

        // Saving is best-effort: the summary above stands either way.
        self.state = RunState::Done;
        match saved {
            Ok(()) => {
                writeln!(out)?;
                writeln!(out, "Saved to {}", self.logbook.absolute_path().display())?;
                info!("Run complete for '{}'", query);
                Ok(())
            }
            Err(e) => {
                error!("Failed to append observation: {}", e);
                Err(e)
            }
        }
    }
}

/// Write the fixed console summary for one observation
fn render_summary<W: Write>(observation: &Observation, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Weather in {}:", observation.place)?;
    writeln!(out, "  Temperature: {:.1} °C", observation.temperature_c)?;
    writeln!(out, "  Humidity:    {} %", observation.humidity_pct)?;
    writeln!(out, "  Wind:        {:.1} km/h", observation.wind_kmh)?;
    writeln!(out, "  Condition:   {}", observation.condition)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherLogConfig;
    use chrono::TimeZone;

    use crate::models::{CurrentConditions, Location};

    fn test_pipeline(log_path: &std::path::Path) -> Pipeline {
        let api = WeatherApiClient::new(&WeatherLogConfig::default()).unwrap();
        Pipeline::new(api, Logbook::new(log_path))
    }

    #[test]
    fn test_starts_idle() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = test_pipeline(&dir.path().join("weather_log.csv"));
        assert_eq!(pipeline.state(), RunState::Idle);
    }

    #[test]
    fn test_empty_query_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("weather_log.csv");
        let mut pipeline = test_pipeline(&log_path);

        let mut out = Vec::new();
        let result = pipeline.run("   ", &mut out);

        assert!(matches!(result, Err(WeatherLogError::Validation { .. })));
        assert_eq!(pipeline.state(), RunState::Failed);
        assert!(out.is_empty());
        assert!(!log_path.exists());
    }

    #[test]
    fn test_render_summary_template() {
        let taken_at = Local.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap();
        let location = Location::new(
            "London, UK".to_string(),
            51.5,
            -0.12,
            "London, United Kingdom".to_string(),
        );
        let current = CurrentConditions {
            temperature_c: 18.3,
            humidity_pct: 60,
            wind_kmh: 12.0,
            weather_code: 1,
        };
        let observation = Observation::from_conditions(taken_at, &location, &current);

        let mut out = Vec::new();
        render_summary(&observation, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.contains("Weather in London, United Kingdom:"));
        assert!(rendered.contains("  Temperature: 18.3 °C"));
        assert!(rendered.contains("  Humidity:    60 %"));
        assert!(rendered.contains("  Wind:        12.0 km/h"));
        assert!(rendered.contains("  Condition:   Mainly clear"));
    }
}
