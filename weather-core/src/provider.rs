use crate::{
    Config,
    error::Result,
    locator::Locator,
    model::{CitySuggestion, ForecastItem, WeatherDetail},
    provider::openweather::{OpenWeatherProvider, ProviderSettings},
    retry::RetryPolicy,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openweather;

/// HTTP seam of the weather client. `WeatherService` talks to the provider
/// only through this trait so tests can swap in a double.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocoding lookup, at most five candidates.
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>>;

    /// Current conditions, addressed by name or coordinates.
    async fn current(&self, locator: &Locator) -> Result<WeatherDetail>;

    /// Raw 5-day series of 3-hour samples for a named city.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastItem>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeather.\n\
                 Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let mut settings = ProviderSettings {
        timeout: Duration::from_secs(config.timeout_secs),
        retry: RetryPolicy::with_retries(config.max_retries),
        ..ProviderSettings::default()
    };
    if let Some(base_url) = &config.base_url {
        settings.base_url = base_url.clone();
    }

    let provider = OpenWeatherProvider::new(api_key, settings)?;
    Ok(Arc::new(provider))
}
