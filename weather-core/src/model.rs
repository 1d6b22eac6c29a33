use chrono::{DateTime, Local, TimeZone};

use crate::display::display_label;

/// A city name exactly as typed by the user, known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Returns `None` only for the empty string. Whitespace is kept and sent
    /// as is; the geocoder decides whether it names a place.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            None
        } else {
            Some(Self(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Conditions right now at the resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Name reported by the weather endpoint, not the text the user typed.
    pub city_name: String,
    pub description: String,
    pub icon_code: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
}

/// One 3-hour step of the 5-day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Unix seconds.
    pub timestamp: i64,
    pub display_label: String,
    pub temperature: f64,
    pub humidity: u8,
    pub icon_code: Option<String>,
}

impl ForecastPoint {
    /// Builds a point labelled in the local calendar.
    pub fn new(timestamp: i64, temperature: f64, humidity: u8, icon_code: Option<String>) -> Self {
        Self::new_in(&Local, timestamp, temperature, humidity, icon_code)
    }

    /// Builds a point labelled in the calendar of `tz`.
    pub fn new_in<Tz: TimeZone>(
        tz: &Tz,
        timestamp: i64,
        temperature: f64,
        humidity: u8,
        icon_code: Option<String>,
    ) -> Self {
        let display_label = DateTime::from_timestamp(timestamp, 0)
            .map(|utc| display_label(&utc.with_timezone(tz)))
            .unwrap_or_else(|| timestamp.to_string());

        Self {
            timestamp,
            display_label,
            temperature,
            humidity,
            icon_code,
        }
    }
}

pub type Forecast = Vec<ForecastPoint>;
