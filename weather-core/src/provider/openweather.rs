use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::{Endpoint, Result, WeatherError},
    model::{Coordinates, CurrentConditions, Forecast, ForecastPoint, Query},
};

use super::WeatherProvider;

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%endpoint, %url, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Parse { endpoint, source })
    }
}

fn coordinate_params(at: Coordinates) -> [(&'static str, String); 3] {
    [
        ("lat", at.latitude.to_string()),
        ("lon", at.longitude.to_string()),
        ("units", "metric".to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwCurrentMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (description, icon_code) = match parsed.weather.into_iter().next() {
            Some(w) => (w.description, w.icon),
            None => ("Unknown".to_string(), None),
        };

        Self {
            city_name: parsed.name,
            description,
            icon_code,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
        }
    }
}

impl From<OwForecastEntry> for ForecastPoint {
    fn from(entry: OwForecastEntry) -> Self {
        let icon_code = entry.weather.into_iter().next().and_then(|w| w.icon);
        ForecastPoint::new(entry.dt, entry.main.temp, entry.main.humidity, icon_code)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, query: &Query) -> Result<Option<Coordinates>> {
        let params = [("q", query.as_str().to_string()), ("limit", "1".to_string())];
        let matches: Vec<OwGeoEntry> = self
            .get_json(Endpoint::Geocoding, GEOCODING_PATH, &params)
            .await?;

        Ok(matches.into_iter().next().map(|m| Coordinates {
            latitude: m.lat,
            longitude: m.lon,
        }))
    }

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions> {
        let parsed: OwCurrentResponse = self
            .get_json(Endpoint::CurrentWeather, CURRENT_PATH, &coordinate_params(at))
            .await?;

        Ok(parsed.into())
    }

    async fn forecast(&self, at: Coordinates) -> Result<Forecast> {
        let parsed: OwForecastResponse = self
            .get_json(Endpoint::Forecast, FORECAST_PATH, &coordinate_params(at))
            .await?;

        Ok(parsed.list.into_iter().map(ForecastPoint::from).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
