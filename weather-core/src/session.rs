//! The submit flow: geocode the typed city, then fetch current conditions and
//! the forecast side by side and keep whatever arrived.

use crate::{
    error::{Result, WeatherError},
    model::{CurrentConditions, Forecast, ForecastPoint, Query},
    provider::WeatherProvider,
};

/// What a call to [`WeatherSession::submit`] did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The query was empty; nothing was requested.
    Ignored,
    /// Coordinates were found and both follow-up fetches ran. Each slice of
    /// the session was replaced only if its own fetch succeeded.
    Fetched {
        current: Result<()>,
        forecast: Result<()>,
    },
}

impl SubmitOutcome {
    /// Errors from the follow-up fetches, if any.
    pub fn failures(&self) -> impl Iterator<Item = &WeatherError> {
        let (current, forecast) = match self {
            SubmitOutcome::Ignored => (None, None),
            SubmitOutcome::Fetched { current, forecast } => {
                (current.as_ref().err(), forecast.as_ref().err())
            }
        };
        current.into_iter().chain(forecast)
    }
}

/// Holds the typed query plus the last successfully fetched data.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    query: String,
    current: Option<CurrentConditions>,
    forecast: Forecast,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            query: String::new(),
            current: None,
            forecast: Vec::new(),
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    /// Points in the order the provider returned them.
    pub fn forecast(&self) -> &[ForecastPoint] {
        &self.forecast
    }

    /// Looks up the current query.
    ///
    /// An empty query is ignored. Any other text, whitespace included, goes
    /// to the geocoder as typed. A query that cannot be geocoded yields
    /// [`WeatherError::InvalidCity`] and leaves the session untouched.
    /// Failures of the two follow-up fetches are reported in the returned
    /// [`SubmitOutcome`], never as `Err`.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(query) = Query::parse(&self.query) else {
            tracing::debug!("empty query, nothing to submit");
            return Ok(SubmitOutcome::Ignored);
        };

        let at = match self.provider.geocode(&query).await {
            Ok(Some(at)) => at,
            Ok(None) => {
                tracing::warn!(%query, "geocoding found no match");
                return Err(WeatherError::InvalidCity(query.to_string()));
            }
            Err(err) => {
                tracing::warn!(%query, error = %err, "geocoding failed");
                return Err(WeatherError::InvalidCity(query.to_string()));
            }
        };

        tracing::debug!(%query, lat = at.latitude, lon = at.longitude, "resolved city");

        let (current, forecast) =
            tokio::join!(self.provider.current(at), self.provider.forecast(at));

        let current = current.map(|conditions| {
            tracing::debug!(city = %conditions.city_name, "current conditions replaced");
            self.current = Some(conditions);
        });
        if let Err(err) = &current {
            tracing::warn!(%query, error = %err, "current weather fetch failed");
        }

        let forecast = forecast.map(|points| {
            tracing::debug!(points = points.len(), "forecast replaced");
            self.forecast = points;
        });
        if let Err(err) = &forecast {
            tracing::warn!(%query, error = %err, "forecast fetch failed");
        }

        Ok(SubmitOutcome::Fetched { current, forecast })
    }
}
