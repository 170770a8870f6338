use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Result, WeatherError},
    locator::Locator,
    model::{CitySuggestion, ForecastItem, WeatherDetail},
    retry::{RetryPolicy, with_retry},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const GEOCODING_PATH: &str = "/geo/1.0/direct";
const GEOCODING_LIMIT: &str = "5";

/// Transport settings for [`OpenWeatherProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| WeatherError::Construction(format!("{}: {e}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(WeatherError::Construction(format!(
                "{}: not usable as a base URL",
                settings.base_url
            )));
        }

        let http = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            api_key,
            base_url,
            retry: settings.retry,
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| WeatherError::Construction(format!("{path}: {e}")))?;
        let url = &url;

        let body = with_retry(&self.retry, move || self.send(url, params)).await?;

        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, url: &Url, params: &[(&str, String)]) -> Result<String> {
        tracing::debug!(path = url.path(), "Requesting OpenWeather");

        let res = self
            .http
            .get(url.clone())
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                message: provider_message(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

/// OpenWeather error replies look like `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        let params = [("q", query.to_string()), ("limit", GEOCODING_LIMIT.to_string())];
        let cities: Vec<OwGeoCity> = self.get_json(GEOCODING_PATH, &params).await?;

        Ok(cities
            .into_iter()
            .map(|c| CitySuggestion::new(c.name, c.country))
            .collect())
    }

    async fn current(&self, locator: &Locator) -> Result<WeatherDetail> {
        let mut params = match locator {
            Locator::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
            Locator::Name(name) => vec![("q", name.clone())],
        };
        params.push(("units", "metric".to_string()));

        self.get_json(CURRENT_PATH, &params).await
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastItem>> {
        let params = [("q", city.to_string()), ("units", "metric".to_string())];
        let parsed: OwForecastResponse = self.get_json(FORECAST_PATH, &params).await?;

        Ok(parsed.list)
    }
}

fn provider_message(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
