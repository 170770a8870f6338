//! Home-screen widget refresh: one entry per cycle, next cycle 30 minutes out.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    location::LocationStore,
    model::{UNKNOWN_CONDITION, WeatherIcon},
    service::WeatherService,
};

pub const REFRESH_INTERVAL_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetEntry {
    pub date: DateTime<Utc>,
    pub city: String,
    pub temperature: String,
    pub condition: String,
    pub icon: WeatherIcon,
}

impl WidgetEntry {
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            date: now,
            city: UNKNOWN_CONDITION.to_string(),
            temperature: "--°C".to_string(),
            condition: UNKNOWN_CONDITION.to_string(),
            icon: WeatherIcon::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<WidgetEntry>,
    pub next_refresh: DateTime<Utc>,
}

/// Build the next widget timeline.
///
/// Uses the cached device location when there is one, `default_city`
/// otherwise. A failed fetch yields the fallback entry rather than an error.
pub async fn refresh(
    service: &WeatherService,
    store: &dyn LocationStore,
    default_city: &str,
    now: DateTime<Utc>,
) -> Timeline {
    let locator = match store.read() {
        Ok(Some(coords)) => coords.to_locator(),
        Ok(None) => default_city.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read cached location, using default city");
            default_city.to_string()
        }
    };

    let entry = match service.fetch_current(&locator).await {
        Ok(weather) => WidgetEntry {
            date: now,
            temperature: weather.temperature_string(),
            icon: weather.icon(),
            city: weather.name,
            condition: weather.condition,
        },
        Err(e) => {
            tracing::warn!(locator = %locator, error = %e, "Widget refresh failed");
            WidgetEntry::fallback(now)
        }
    };

    Timeline {
        entries: vec![entry],
        next_refresh: now + Duration::minutes(REFRESH_INTERVAL_MINUTES),
    }
}
