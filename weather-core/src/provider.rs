use crate::{
    Config,
    error::WeatherError,
    model::{GeocodeResult, RawForecastPayload},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// The two upstream calls a search needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a non-empty, trimmed city name to its first match.
    async fn geocode(&self, city: &str) -> Result<GeocodeResult, WeatherError>;

    /// Current conditions plus hourly and daily series for a coordinate.
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecastPayload, WeatherError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(Box::new(provider))
}
