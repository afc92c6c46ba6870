//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The provider seam and its Open-Meteo implementation
//! - `WeatherLookupClient`: geocode, fetch forecast, project into a report
//! - Weather-code classification and display formatting
//! - `Dashboard`, the display state machine driven by searches
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod lookup;
pub mod model;
pub mod provider;

pub use condition::{WeatherCondition, classify_weather_code};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardState};
pub use error::WeatherError;
pub use format::TemperatureUnit;
pub use lookup::{WeatherLookupClient, project};
pub use model::{CurrentWeather, DailyForecast, GeocodeResult, RawForecastPayload, WeatherReport};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider};
