//! Core library for the `weather` app.
//!
//! This crate defines:
//! - An OpenWeather client behind the `WeatherProvider` trait
//! - Aggregation of 3-hour forecast samples into daily summaries
//! - The tracked city list, last-known-location cache and widget refresh
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod locator;
pub mod location;
pub mod model;
pub mod provider;
pub mod retry;
pub mod service;
pub mod suggest;
pub mod tracked;
pub mod widget;

pub use config::Config;
pub use error::WeatherError;
pub use locator::Locator;
pub use location::{FileLocationStore, LocationStore, MemoryLocationStore};
pub use model::{
    CitySuggestion, CityWeather, Coordinates, DailyForecast, ForecastItem, WeatherDetail,
    WeatherIcon,
};
pub use provider::WeatherProvider;
pub use service::{DetailPage, WeatherService};
pub use suggest::{SuggestionOutcome, SuggestionSession};
pub use tracked::TrackedCities;
