use reqwest::StatusCode;

/// Failure of a single request against the weather provider, or of the
/// location cache.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The request URL could not be built from the configured base URL.
    #[error("Invalid request URL: {0}")]
    Construction(String),

    /// Network, DNS or timeout failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The response body did not have the expected shape.
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Location cache error: {0}")]
    Location(String),
}

impl WeatherError {
    /// Whether the failure happened below the HTTP layer and may succeed on retry.
    pub fn is_transport(&self) -> bool {
        match self {
            WeatherError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
