use crate::{
    Config,
    error::Result,
    model::{Coordinates, CurrentConditions, Forecast, Query},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The three upstream lookups a submit is built from.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// First match for `query`, or `None` when the provider knows no such place.
    async fn geocode(&self, query: &Query) -> Result<Option<Coordinates>>;

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions>;

    /// 5-day forecast in 3-hour steps, in whatever order the provider returns.
    async fn forecast(&self, at: Coordinates) -> Result<Forecast>;
}

/// Construct the OpenWeather provider from config and the environment.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    let boxed: Box<dyn WeatherProvider> =
        Box::new(OpenWeatherProvider::with_base_url(api_key, config.api_base_url()));

    Ok(boxed)
}
