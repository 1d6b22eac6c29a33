//! Formatting shared by every renderer: labels, rounding, icons and the
//! chart's value range.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::model::ForecastPoint;

pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// `M/D (Weekday) H am|pm`, e.g. `3/2 (Sa) 2 pm`.
///
/// The hour is taken modulo 12, so midnight and noon both print as `0`.
pub fn display_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let hour = at.hour();
    let weekday = WEEKDAYS[at.weekday().num_days_from_sunday() as usize];
    let meridiem = if hour < 12 { "am" } else { "pm" };

    format!("{}/{} ({weekday}) {} {meridiem}", at.month(), at.day(), hour % 12)
}

/// One decimal place followed by the unit, e.g. `21.3°C`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.1}°C")
}

pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}.png")
}

/// Text shown for a single chart point, e.g. `3/2 (Sa) 2 pm: 14.2°C`.
pub fn tooltip_text(point: &ForecastPoint) -> String {
    format!("{}: {}", point.display_label, format_temperature(point.temperature))
}

/// A copy of `points` ordered by timestamp; the input is left as is.
pub fn sorted_by_time(points: &[ForecastPoint]) -> Vec<ForecastPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.timestamp);
    sorted
}

/// Y axis range: one degree of padding around the whole-degree envelope of
/// all temperatures. `None` when there are no points.
pub fn temperature_domain(points: &[ForecastPoint]) -> Option<(f64, f64)> {
    let mut temps = points.iter().map(|p| p.temperature);
    let first = temps.next()?;
    let (min, max) = temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));

    Some((min.floor() - 1.0, max.ceil() + 1.0))
}
