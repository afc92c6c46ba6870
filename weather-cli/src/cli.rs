use std::{io::Write, path::PathBuf};

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use weather_core::{Config, Dashboard, DashboardState, TemperatureUnit, WeatherLookupClient};

use crate::render::render_state;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 7-day forecast for a city")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city and temperature unit.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, e.g. "Hyderabad".
        city: String,

        /// "celsius" or "fahrenheit"; defaults to the configured unit.
        #[arg(long)]
        unit: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up the default city, then prompt for more until cancelled.
    Interactive {
        #[arg(long)]
        unit: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Configure => configure(config, self.config).await,
            Command::Show { city, unit, json } => {
                let unit = resolve_unit(unit.as_deref(), &config)?;
                show(&config, &city, unit, json).await
            }
            Command::Interactive { unit } => {
                let unit = resolve_unit(unit.as_deref(), &config)?;
                interactive(&config, unit).await
            }
        }
    }
}

fn resolve_unit(flag: Option<&str>, config: &Config) -> anyhow::Result<TemperatureUnit> {
    flag.map_or(Ok(config.unit), TemperatureUnit::try_from)
}

async fn show(config: &Config, city: &str, unit: TemperatureUnit, json: bool) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(WeatherLookupClient::from_config(config)?);

    match dashboard.search(city).await {
        DashboardState::Loaded(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        DashboardState::Failed(message) => Err(anyhow!(message)),
        state => {
            print!("{}", render_state(&state, unit, Local::now().date_naive()));
            Ok(())
        }
    }
}

async fn interactive(config: &Config, unit: TemperatureUnit) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(WeatherLookupClient::from_config(config)?);

    search_and_render(&mut dashboard, &config.default_city, unit).await?;

    loop {
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("City:").with_placeholder("Enter city name...").prompt()
        })
        .await
        .context("Prompt task failed")?;

        match answer {
            Ok(city) => search_and_render(&mut dashboard, &city, unit).await?,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Run a search while printing each state transition as it is published.
async fn search_and_render(
    dashboard: &mut Dashboard,
    city: &str,
    unit: TemperatureUnit,
) -> anyhow::Result<()> {
    let mut rx = dashboard.subscribe();
    let today = Local::now().date_naive();

    let printer = async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            print!("{}", render_state(&state, unit, today));
            std::io::stdout().flush()?;
            if !state.is_loading() {
                break;
            }
        }
        Ok::<(), std::io::Error>(())
    };

    let (_, printed) = tokio::join!(dashboard.search(city), printer);
    printed.context("Failed to write to stdout")
}

async fn configure(mut config: Config, path: Option<PathBuf>) -> anyhow::Result<()> {
    let current_city = config.default_city.clone();
    let current_unit = config.unit;

    let (city, unit) = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let city = Text::new("Default city:").with_default(&current_city).prompt()?;

        let units = TemperatureUnit::all().to_vec();
        let start = units.iter().position(|u| *u == current_unit).unwrap_or(0);
        let unit = Select::new("Temperature unit:", units).with_starting_cursor(start).prompt()?;

        Ok((city, unit))
    })
    .await
    .context("Prompt task failed")??;

    config.set_default_city(&city)?;
    config.unit = unit;

    let saved_to = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}
