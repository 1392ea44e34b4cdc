//! Append-only CSV logbook for weather observations

use crate::models::Observation;
use crate::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column order of the log file
const HEADER: [&str; 6] = [
    "timestamp",
    "place",
    "temperature_c",
    "humidity_pct",
    "wind_kmh",
    "condition",
];

/// Writer for the persistent weather log
#[derive(Debug, Clone)]
pub struct Logbook {
    path: PathBuf,
}

impl Logbook {
    /// Create a logbook writing to the given path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file as configured
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of the log file, falling back to the configured path
    /// when it cannot be resolved (e.g. the file was never created)
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        self.path
            .canonicalize()
            .unwrap_or_else(|_| self.path.clone())
    }

    /// Append one observation, creating the file with a header row if absent
    ///
    /// The file handle is scoped to this call; the writer flushes before it
    /// drops, so a returned `Ok` means the row reached the OS.
    pub fn append(&self, observation: &Observation) -> Result<()> {
        let is_new = !self.path.exists();
        debug!(path = %self.path.display(), is_new, "Appending to weather log");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record(observation.csv_record())?;
        writer.flush()?;

        info!(path = %self.path.display(), "Observation logged");
        Ok(())
    }
}
