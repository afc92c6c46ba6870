use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Config,
    error::WeatherError,
    model::{GeocodeResult, RawForecastPayload},
};

use super::WeatherProvider;

const HOURLY_SERIES: &str = "temperature_2m,weathercode,relative_humidity_2m,visibility,pressure_msl";
const DAILY_SERIES: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Open-Meteo geocoding + forecast endpoints. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    results: Option<Vec<OmGeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmErrorBody {
    reason: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, city: &str) -> Result<GeocodeResult, WeatherError> {
        tracing::debug!(city, url = %self.geocoding_url, "geocoding request");

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(city, %status, "geocoding request failed");
            return Err(WeatherError::NotFound);
        }

        let body = res.text().await?;
        let parsed: OmGeocodingResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Decode(format!("geocoding: {e}")))?;

        let first = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or(WeatherError::NotFound)?;

        tracing::debug!(
            name = %first.name,
            latitude = first.latitude,
            longitude = first.longitude,
            "geocoded"
        );

        Ok(GeocodeResult {
            latitude: first.latitude,
            longitude: first.longitude,
            resolved_name: first.name,
        })
    }

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecastPayload, WeatherError> {
        tracing::debug!(latitude, longitude, url = %self.forecast_url, "forecast request");

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_SERIES),
                ("daily", DAILY_SERIES),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<OmErrorBody>(&body)
                .ok()
                .and_then(|b| b.reason);
            tracing::warn!(%status, reason = ?reason, "forecast request failed");
            return Err(WeatherError::upstream(reason));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Decode(format!("forecast: {e}")))
    }
}
