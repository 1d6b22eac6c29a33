//! Error type shared by the provider and the session.

use std::fmt;

use thiserror::Error;

/// The upstream call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    CurrentWeather,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocoding => "geocoding",
            Endpoint::CurrentWeather => "current weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The city could not be resolved to coordinates.
    #[error("invalid city name \"{0}\"")]
    InvalidCity(String),

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: set OPENWEATHER_API_KEY or run `weather configure` and enter your API key."
    )]
    MissingApiKey,

    #[error("Failed to send request to OpenWeather ({endpoint})")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON")]
    Parse {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Which upstream call failed, if the error came from one.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Request { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Parse { endpoint, .. } => Some(*endpoint),
            Self::InvalidCity(_) | Self::MissingApiKey => None,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
