//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - Shared domain models (query, current conditions, forecast points)
//! - The submit flow ([`WeatherSession`]) and display formatting helpers
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{Endpoint, WeatherError};
pub use model::{Coordinates, CurrentConditions, Forecast, ForecastPoint, Query};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{SubmitOutcome, WeatherSession};
