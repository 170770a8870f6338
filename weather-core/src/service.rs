use std::sync::Arc;

use chrono::{Local, TimeZone};
use tokio::task::JoinSet;

use crate::{
    Config,
    error::Result,
    forecast,
    locator::Locator,
    model::{CitySuggestion, CityWeather, DailyForecast, WeatherDetail},
    provider::{WeatherProvider, provider_from_config},
    tracked::TrackedCities,
};

/// Everything the detail page shows for one city.
#[derive(Debug, Clone)]
pub struct DetailPage {
    pub detail: WeatherDetail,
    pub forecast: Vec<DailyForecast>,
}

/// Entry point for all weather lookups. Cheap to clone; clones share the
/// provider.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    /// City candidates for a partially typed name. A blank query returns no
    /// candidates without contacting the provider.
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.provider.search_cities(query).await
    }

    /// Current conditions for a city name or a `"lat,lon"` pair.
    pub async fn fetch_current(&self, locator: &str) -> Result<CityWeather> {
        let detail = self.fetch_detail(locator).await?;
        Ok(CityWeather::from(detail))
    }

    pub async fn fetch_detail(&self, locator: &str) -> Result<WeatherDetail> {
        let locator = Locator::parse(locator);
        self.provider.current(&locator).await
    }

    /// Daily summaries, keyed by this machine's local calendar.
    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<DailyForecast>> {
        self.fetch_forecast_in(city, &Local).await
    }

    pub async fn fetch_forecast_in<Tz: TimeZone>(
        &self,
        city: &str,
        tz: &Tz,
    ) -> Result<Vec<DailyForecast>> {
        let items = self.provider.forecast(city).await?;
        tracing::debug!(city, samples = items.len(), "Aggregating forecast");
        Ok(forecast::aggregate(&items, tz))
    }

    /// Detail and forecast fetched concurrently; fails if either fails.
    pub async fn load_detail(&self, city: &str) -> Result<DetailPage> {
        let (detail, forecast) =
            tokio::try_join!(self.fetch_detail(city), self.fetch_forecast(city))?;

        Ok(DetailPage { detail, forecast })
    }

    /// Current conditions for every city, fetched concurrently. Cities that
    /// fail are logged and left out; the rest keep the order of `cities`.
    pub async fn load_all<S: AsRef<str>>(&self, cities: &[S]) -> Vec<CityWeather> {
        self.load_keyed(cities)
            .await
            .into_iter()
            .map(|(_, weather)| weather)
            .collect()
    }

    /// Refresh the snapshot of every tracked city. Returns how many were updated.
    pub async fn refresh_tracked(&self, tracked: &mut TrackedCities) -> usize {
        let names = tracked.names();
        let mut updated = 0;

        for (name, weather) in self.load_keyed(&names).await {
            if tracked.set_snapshot(&name, weather) {
                updated += 1;
            }
        }

        updated
    }

    /// Fetch a snapshot for `city` and track it. The list is only touched
    /// once the fetch succeeded.
    pub async fn add_city(&self, tracked: &mut TrackedCities, city: &str) -> Result<CityWeather> {
        let city = city.trim();
        let weather = self.fetch_current(city).await?;
        tracked.add(city, weather.clone());
        Ok(weather)
    }

    async fn load_keyed<S: AsRef<str>>(&self, cities: &[S]) -> Vec<(String, CityWeather)> {
        let mut tasks = JoinSet::new();

        for (index, city) in cities.iter().enumerate() {
            let service = self.clone();
            let city = city.as_ref().to_string();
            tasks.spawn(async move {
                let result = service.fetch_current(&city).await;
                (index, city, result)
            });
        }

        let mut loaded = Vec::with_capacity(cities.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, city, Ok(weather))) => loaded.push((index, city, weather)),
                Ok((_, city, Err(e))) => {
                    tracing::warn!(city = %city, error = %e, "Skipping city, weather fetch failed");
                }
                Err(e) => tracing::warn!(error = %e, "Weather fetch task did not complete"),
            }
        }

        loaded.sort_by_key(|(index, _, _)| *index);
        loaded
            .into_iter()
            .map(|(_, city, weather)| (city, weather))
            .collect()
    }
}
