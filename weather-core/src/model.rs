use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Description used when the provider sends no condition for a sample.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Current conditions for one city, as shown in the tracked-city list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub id: Uuid,
    pub name: String,
    pub temperature: f64,
    pub condition: String,
}

impl CityWeather {
    pub fn new(name: impl Into<String>, temperature: f64, condition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            temperature,
            condition: condition.into(),
        }
    }

    pub fn temperature_string(&self) -> String {
        format_celsius(self.temperature)
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_condition(&self.condition)
    }
}

/// Detailed current conditions, decoded straight from `/data/2.5/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDetail {
    pub name: String,
    pub main: DetailMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailMain {
    pub temp: f64,
    pub humidity: u8,
}

/// One entry of the provider's `weather` array. The provider lists the most
/// significant condition first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: Option<String>,
}

impl WeatherDetail {
    pub fn condition(&self) -> &str {
        first_description(&self.weather)
    }

    pub fn temperature_string(&self) -> String {
        format_celsius(self.main.temp)
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_condition(self.condition())
    }
}

impl From<WeatherDetail> for CityWeather {
    fn from(detail: WeatherDetail) -> Self {
        let condition = detail.condition().to_string();
        CityWeather::new(detail.name, detail.main.temp, condition)
    }
}

/// Geocoding candidate offered while the user types a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub id: Uuid,
    pub name: String,
    pub country: String,
}

impl CitySuggestion {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            country: country.into(),
        }
    }

    /// E.g. "Victoria, CA".
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Raw 3-hour forecast sample from `/data/2.5/forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Seconds since the Unix epoch.
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

impl ForecastItem {
    pub fn condition(&self) -> &str {
        first_description(&self.weather)
    }
}

/// One aggregated day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub id: Uuid,
    pub date: NaiveDate,
    pub average_temp: f64,
    pub condition: String,
}

impl DailyForecast {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.date.weekday())
    }

    pub fn temperature_string(&self) -> String {
        format_celsius(self.average_temp)
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_condition(&self.condition)
    }
}

/// A device position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The `"lat,lon"` locator understood by the current-conditions fetch.
    pub fn to_locator(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Icon category for a provider condition description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Overcast,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
    Unknown,
}

impl WeatherIcon {
    pub fn from_condition(condition: &str) -> Self {
        match condition.trim().to_lowercase().as_str() {
            "clear sky" => Self::Clear,
            "few clouds" | "scattered clouds" | "broken clouds" => Self::PartlyCloudy,
            "overcast clouds" => Self::Overcast,
            "moderate rain" | "shower rain" | "rain" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "fog" | "haze" => Self::Fog,
            _ => Self::Unknown,
        }
    }

    /// SF Symbols name used by the mobile surfaces.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun.max.fill",
            Self::PartlyCloudy => "cloud.sun.fill",
            Self::Overcast => "cloud.fill",
            Self::Rain => "cloud.rain.fill",
            Self::Thunderstorm => "cloud.bolt.rain.fill",
            Self::Snow => "snowflake",
            Self::Fog => "cloud.fog.fill",
            Self::Unknown => "questionmark.circle.fill",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁",
            Self::Rain => "🌧",
            Self::Thunderstorm => "⛈",
            Self::Snow => "❄",
            Self::Fog => "🌫",
            Self::Unknown => "?",
        }
    }
}

pub(crate) fn first_description(weather: &[Condition]) -> &str {
    weather
        .first()
        .and_then(|c| c.description.as_deref())
        .unwrap_or(UNKNOWN_CONDITION)
}

fn format_celsius(value: f64) -> String {
    format!("{value:.1}°C")
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_string_has_one_decimal() {
        let weather = CityWeather::new("Toronto", 3.456, "clear sky");
        assert_eq!(weather.temperature_string(), "3.5°C");
    }

    #[test]
    fn icon_matching_is_case_insensitive() {
        assert_eq!(WeatherIcon::from_condition("Clear Sky"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_condition("broken clouds"), WeatherIcon::PartlyCloudy);
        assert_eq!(WeatherIcon::from_condition("HAZE"), WeatherIcon::Fog);
        assert_eq!(WeatherIcon::from_condition("light drizzle"), WeatherIcon::Unknown);
        assert_eq!(WeatherIcon::Unknown.symbol_name(), "questionmark.circle.fill");
    }

    #[test]
    fn suggestion_display_name() {
        let s = CitySuggestion::new("Victoria", "CA");
        assert_eq!(s.display_name(), "Victoria, CA");
    }

    #[test]
    fn detail_without_weather_array_defaults_to_unknown() {
        let detail: WeatherDetail =
            serde_json::from_str(r#"{"name":"Oslo","main":{"temp":-2.5,"humidity":80}}"#).unwrap();
        assert_eq!(detail.condition(), UNKNOWN_CONDITION);
        assert_eq!(detail.main.humidity, 80);

        let weather = CityWeather::from(detail);
        assert_eq!(weather.name, "Oslo");
        assert_eq!(weather.condition, "Unknown");
    }

    #[test]
    fn detail_missing_humidity_is_rejected() {
        let res = serde_json::from_str::<WeatherDetail>(r#"{"name":"Oslo","main":{"temp":1.0}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn city_weather_survives_serialization() {
        let weather = CityWeather::new("St. Catharines", -4.75, "light snow");
        let json = serde_json::to_string(&weather).unwrap();
        let back: CityWeather = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, weather.id);
        assert_eq!(back.name, "St. Catharines");
        assert_eq!(back.temperature, -4.75);
        assert_eq!(back.condition, "light snow");
        assert_eq!(back.temperature_string(), weather.temperature_string());
    }

    #[test]
    fn weather_detail_survives_serialization() {
        let detail = WeatherDetail {
            name: "Halifax".to_string(),
            main: DetailMain { temp: 6.5, humidity: 93 },
            weather: vec![
                Condition { description: Some("moderate rain".to_string()) },
                Condition { description: Some("mist".to_string()) },
            ],
        };
        let json = serde_json::to_string(&detail).unwrap();
        let back: WeatherDetail = serde_json::from_str(&json).unwrap();

        assert_eq!(back, detail);
        assert_eq!(back.main.humidity, 93);
        assert_eq!(back.condition(), "moderate rain");
        assert_eq!(back.weather[1].description.as_deref(), Some("mist"));
    }

    #[test]
    fn daily_forecast_survives_serialization() {
        let day = DailyForecast {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 2, 24).unwrap(),
            average_temp: 13.25,
            condition: "light rain".to_string(),
        };
        let json = serde_json::to_string(&day).unwrap();
        let back: DailyForecast = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
        assert_eq!(back.day_name(), "Monday");
    }

    #[test]
    fn coordinates_format_as_locator() {
        assert_eq!(Coordinates::new(43.65, -79.38).to_locator(), "43.65,-79.38");
    }
}
