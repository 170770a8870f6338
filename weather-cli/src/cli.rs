use std::time::Duration;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use weather_core::{
    Config, Coordinates, FileLocationStore, LocationStore, SuggestionOutcome, SuggestionSession,
    TrackedCities, WeatherService, widget,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current conditions and 5-day forecasts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Suggest cities matching a partial name.
    Search {
        query: String,
    },

    /// Show current conditions for a city name or a "lat,lon" pair.
    Current {
        locator: String,
    },

    /// Show current details and the daily forecast for a city.
    Detail {
        city: String,
    },

    /// Show the daily forecast for a city.
    Forecast {
        city: String,
    },

    /// Show current conditions for every tracked city.
    List,

    /// Add or remove tracked cities.
    Track {
        #[command(subcommand)]
        action: TrackAction,
    },

    /// Record the device position used by the widget.
    Locate {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Run one widget refresh and print its entry.
    Widget,
}

#[derive(Debug, Subcommand)]
pub enum TrackAction {
    /// Fetch a city's weather and add it to the tracked list.
    Add { city: String },
    /// Remove a city from the tracked list.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Search { query } => {
                let session = SuggestionSession::new(service(&config)?, Duration::ZERO);
                match session.suggest(&query).await {
                    SuggestionOutcome::Ready(list) if list.is_empty() => {
                        println!("No matching cities.")
                    }
                    SuggestionOutcome::Ready(list) => {
                        for city in list {
                            println!("{}", city.display_name());
                        }
                    }
                    SuggestionOutcome::Stale => {}
                }
            }
            Command::Current { locator } => {
                let weather = service(&config)?
                    .fetch_current(&locator)
                    .await
                    .with_context(|| format!("Could not fetch weather for '{locator}'"))?;
                println!("{}", output::city_line(&weather));
            }
            Command::Detail { city } => {
                let page = service(&config)?
                    .load_detail(&city)
                    .await
                    .with_context(|| format!("Could not load details for '{city}'"))?;
                print!("{}", output::detail(&page));
            }
            Command::Forecast { city } => {
                let days = service(&config)?
                    .fetch_forecast(&city)
                    .await
                    .with_context(|| format!("Could not fetch forecast for '{city}'"))?;
                print!("{}", output::forecast(&days));
            }
            Command::List => {
                let mut tracked = TrackedCities::from_names(&config.tracked_cities);
                service(&config)?.refresh_tracked(&mut tracked).await;
                print!("{}", output::tracked(&tracked));
            }
            Command::Track { action } => track(&mut config, action).await?,
            Command::Locate { latitude, longitude } => {
                let coords = Coordinates::new(latitude, longitude);
                let store = location_store()?;
                store.write(coords)?;
                println!("Saved location {} to {}", coords.to_locator(), store.path().display());
            }
            Command::Widget => {
                let store = location_store()?;
                let timeline =
                    widget::refresh(&service(&config)?, &store, &config.default_city, Utc::now())
                        .await;
                print!("{}", output::timeline(&timeline));
            }
        }

        Ok(())
    }
}

fn service(config: &Config) -> anyhow::Result<WeatherService> {
    WeatherService::from_config(config)
}

fn location_store() -> anyhow::Result<FileLocationStore> {
    Ok(FileLocationStore::new(Config::location_path()?))
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn track(config: &mut Config, action: TrackAction) -> anyhow::Result<()> {
    let mut tracked = TrackedCities::from_names(&config.tracked_cities);

    match action {
        TrackAction::Add { city } => {
            let weather = service(config)?
                .add_city(&mut tracked, &city)
                .await
                .with_context(|| format!("Could not add '{city}'"))?;
            println!("{}", output::city_line(&weather));
        }
        TrackAction::Remove { city } => {
            if tracked.remove(&city).is_none() {
                bail!("'{city}' is not tracked");
            }
            println!("Removed {city}");
        }
    }

    config.tracked_cities = tracked.names();
    config.save()
}
