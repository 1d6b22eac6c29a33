//! Text renderers for the two views. Both are pure functions of session
//! state and return lines, leaving printing to the caller.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};
use weather_core::{
    CurrentConditions, ForecastPoint,
    display::{format_temperature, icon_url, sorted_by_time, temperature_domain, tooltip_text},
};

pub const DEFAULT_CHART_WIDTH: u16 = 100;
pub const DEFAULT_CHART_HEIGHT: u16 = 20;

/// Columns reserved per x-axis label.
const LABEL_WIDTH: u16 = 16;

pub fn conditions_view(current: Option<&CurrentConditions>) -> Vec<String> {
    let Some(current) = current else {
        return Vec::new();
    };

    let mut lines = vec![
        format!("City: {}", current.city_name),
        format!("Actual: {}", format_temperature(current.temperature)),
    ];
    match &current.icon_code {
        Some(icon) => lines.push(format!("  {} <{}>", current.description, icon_url(icon))),
        None => lines.push(format!("  {}", current.description)),
    }
    lines.push(format!("Feels like: {}", format_temperature(current.feels_like)));

    lines
}

/// Heading, chart, then one `label: temperature` line per point, all in
/// timestamp order.
pub fn forecast_view(points: &[ForecastPoint], width: u16, height: u16) -> Vec<String> {
    let Some((low, high)) = temperature_domain(points) else {
        return Vec::new();
    };
    let sorted = sorted_by_time(points);

    let data: Vec<(f64, f64)> = sorted
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.temperature))
        .collect();
    let x_max = (sorted.len().saturating_sub(1) as f64).max(1.0);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(Block::bordered().title(" Temperature (°C) "))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels(&sorted, width)),
        )
        .y_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec![format!("{low:.0}"), format!("{high:.0}")]),
        );

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    let mut lines = vec!["5-days forecast:".to_string()];
    lines.extend(buffer_lines(&buf));
    lines.extend(sorted.iter().map(tooltip_text));
    lines
}

/// Evenly spaced labels, first and last included, as many as fit in `width`.
/// The axis spreads labels evenly, so evenly spaced indices line up with
/// their points.
fn x_labels(sorted: &[ForecastPoint], width: u16) -> Vec<String> {
    let count = sorted.len();
    let fit = usize::from((width / LABEL_WIDTH).max(2));

    if count <= fit {
        return sorted.iter().map(|p| p.display_label.clone()).collect();
    }

    (0..fit)
        .map(|k| sorted[k * (count - 1) / (fit - 1)].display_label.clone())
        .collect()
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}
