//! Error types and handling for the weatherlog application

use thiserror::Error;

/// Main error type for the weatherlog application
#[derive(Error, Debug)]
pub enum WeatherLogError {
    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned no candidates for the query
    #[error("No location found for '{query}'")]
    NotFound { query: String },

    /// Transport-level failures on either HTTP endpoint
    #[error("Network error: {message}")]
    Network { message: String },

    /// Malformed or unexpected responses from an endpoint
    #[error("Unexpected response from weather service: {message}")]
    Upstream { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<csv::Error> for WeatherLogError {
    fn from(e: csv::Error) -> Self {
        match e.into_kind() {
            csv::ErrorKind::Io(source) => Self::Io { source },
            other => Self::Io {
                source: std::io::Error::other(format!("csv: {other:?}")),
            },
        }
    }
}

impl WeatherLogError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a geocoding query
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherLogError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherLogError::NotFound { query } => {
                format!("Could not find a location for '{query}'. Try a more specific name.")
            }
            WeatherLogError::Network { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            WeatherLogError::Upstream { message } => {
                format!("The weather service returned an unexpected response: {message}")
            }
            WeatherLogError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherLogError::Io { .. } => {
                "Could not write the weather log file. Please check file permissions.".to_string()
            }
        }
    }

    /// Process exit code for this failure class
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherLogError::Validation { .. } | WeatherLogError::Config { .. } => 2,
            WeatherLogError::NotFound { .. } => 3,
            WeatherLogError::Network { .. } | WeatherLogError::Upstream { .. } => 4,
            WeatherLogError::Io { .. } => 5,
        }
    }
}
