//! Plain-text rendering for terminal output.

use std::fmt::Write;

use weather_core::{CityWeather, DailyForecast, DetailPage, TrackedCities, widget::Timeline};

pub fn city_line(weather: &CityWeather) -> String {
    format!(
        "{} {:<20} {:>8}  {}",
        weather.icon().glyph(),
        weather.name,
        weather.temperature_string(),
        weather.condition
    )
}

pub fn tracked(tracked: &TrackedCities) -> String {
    let mut out = String::new();
    for city in tracked.iter() {
        let line = match &city.weather {
            Some(weather) => city_line(weather),
            None => format!("? {:<20} {:>8}  unavailable", city.name, "--°C"),
        };
        writeln!(out, "{line}").ok();
    }
    out
}

pub fn forecast(days: &[DailyForecast]) -> String {
    if days.is_empty() {
        return "No forecast available.\n".to_string();
    }

    let mut out = String::new();
    for day in days {
        writeln!(
            out,
            "{} {:<10} {}  {:>8}  {}",
            day.icon().glyph(),
            day.day_name(),
            day.date,
            day.temperature_string(),
            day.condition
        )
        .ok();
    }
    out
}

pub fn detail(page: &DetailPage) -> String {
    let detail = &page.detail;
    let mut out = String::new();

    writeln!(out, "{} {}", detail.icon().glyph(), detail.name).ok();
    writeln!(out, "  Temperature: {}", detail.temperature_string()).ok();
    writeln!(out, "  Condition:   {}", capitalize(detail.condition())).ok();
    writeln!(out, "  Humidity:    {}%", detail.main.humidity).ok();
    writeln!(out).ok();
    out.push_str(&forecast(&page.forecast));
    out
}

pub fn timeline(timeline: &Timeline) -> String {
    let mut out = String::new();
    for entry in &timeline.entries {
        writeln!(
            out,
            "{} {}  {}  {}",
            entry.icon.glyph(),
            entry.city,
            entry.temperature,
            entry.condition
        )
        .ok();
    }
    writeln!(out, "Next refresh: {}", timeline.next_refresh.format("%H:%M UTC")).ok();
    out
}

/// "scattered clouds" -> "Scattered Clouds"
fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use weather_core::{WeatherDetail, model::{Condition, DetailMain}};

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize("scattered clouds"), "Scattered Clouds");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn forecast_lists_one_line_per_day() {
        let days = vec![DailyForecast {
            id: Default::default(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            average_temp: 13.0,
            condition: "clear sky".to_string(),
        }];

        let text = forecast(&days);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Saturday"));
        assert!(text.contains("13.0°C"));
    }

    #[test]
    fn detail_shows_humidity() {
        let page = DetailPage {
            detail: WeatherDetail {
                name: "Halifax".to_string(),
                main: DetailMain { temp: 4.0, humidity: 81 },
                weather: vec![Condition { description: Some("light rain".to_string()) }],
            },
            forecast: Vec::new(),
        };

        let text = detail(&page);
        assert!(text.contains("Humidity:    81%"));
        assert!(text.contains("Light Rain"));
        assert!(text.contains("No forecast available."));
    }

    #[test]
    fn untracked_snapshot_renders_placeholder() {
        let text = tracked(&TrackedCities::from_names(["Oslo"]));
        assert!(text.contains("Oslo"));
        assert!(text.contains("unavailable"));
    }
}
