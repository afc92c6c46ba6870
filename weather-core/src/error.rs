use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter a city name";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to fetch weather data.";

/// Everything that can end a single weather search.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Empty or whitespace-only city name; no request was sent.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// Geocoding answered with a non-2xx status or with no results.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Forecast endpoint answered with a non-2xx status.
    #[error("{0}")]
    Upstream(String),

    /// Transport-level failure (DNS, connect, timeout).
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body that did not have the expected shape.
    #[error("Invalid response from weather service: {0}")]
    Decode(String),
}

impl WeatherError {
    /// Build an upstream error from the server's `reason`, or the generic fallback.
    pub fn upstream(reason: Option<String>) -> Self {
        match reason {
            Some(reason) if !reason.is_empty() => Self::Upstream(reason),
            _ => Self::Upstream(UPSTREAM_FALLBACK_MESSAGE.to_string()),
        }
    }
}
