//! Weather crate error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Unable to reach the weather service. Check your connection.",
            Self::Api { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Please try again later."
            }
            Self::Api { .. } => "Weather data could not be loaded. Please try again.",
            Self::Parse(_) => "Received unexpected weather data. Please try again.",
            Self::Cache(_) | Self::Io(_) => "Saved weather data is unavailable.",
        }
    }

    /// Whether this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
