use chrono::{Local, Timelike};

use crate::{
    Config,
    error::WeatherError,
    model::{CurrentWeather, DailyForecast, GeocodeResult, RawForecastPayload, WeatherReport},
    provider::{WeatherProvider, provider_from_config},
};

/// Forecast cards shown after today.
pub const FORECAST_DAYS: usize = 7;

/// Geocode → forecast → projection, run strictly in sequence.
#[derive(Debug)]
pub struct WeatherLookupClient {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherLookupClient {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    /// Resolve a city name; blank input fails before any request is made.
    pub async fn resolve_city(&self, city_name: &str) -> Result<GeocodeResult, WeatherError> {
        let city = city_name.trim();
        if city.is_empty() {
            return Err(WeatherError::Validation);
        }
        self.provider.geocode(city).await
    }

    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecastPayload, WeatherError> {
        self.provider.forecast(latitude, longitude).await
    }

    /// Full lookup using the caller's current local hour.
    pub async fn search(&self, city_name: &str) -> Result<WeatherReport, WeatherError> {
        self.search_at_hour(city_name, Local::now().hour() as usize).await
    }

    pub async fn search_at_hour(
        &self,
        city_name: &str,
        local_hour: usize,
    ) -> Result<WeatherReport, WeatherError> {
        let place = self.resolve_city(city_name).await?;
        let payload = self.fetch_forecast(place.latitude, place.longitude).await?;
        Ok(project(&payload, &place.resolved_name, local_hour))
    }
}

/// Build the display model from a forecast payload.
///
/// Hourly fields are read at `local_hour`, clamped to each series' bounds.
/// The forecast holds daily entries `1..=7`; shorter series give fewer days.
/// `null` daily samples stay in the sequence as `None`.
pub fn project(payload: &RawForecastPayload, city: &str, local_hour: usize) -> WeatherReport {
    let cw = &payload.current_weather;
    let hourly = &payload.hourly;

    let current = CurrentWeather {
        city: city.to_string(),
        temperature_c: cw.temperature,
        wind_speed_kmh: cw.windspeed,
        wind_direction_deg: cw.winddirection,
        weather_code: cw.weathercode,
        humidity_pct: sample_at(&hourly.relative_humidity_2m, local_hour),
        visibility_m: sample_at(&hourly.visibility, local_hour),
        pressure_hpa: sample_at(&hourly.pressure_msl, local_hour),
    };

    let daily = &payload.daily;
    let forecast = daily
        .time
        .iter()
        .zip(&daily.temperature_2m_max)
        .zip(&daily.temperature_2m_min)
        .zip(&daily.weathercode)
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|(((date, max), min), code)| DailyForecast {
            date: date.clone(),
            max_temp_c: *max,
            min_temp_c: *min,
            weather_code: *code,
        })
        .collect();

    WeatherReport { current, forecast }
}

fn sample_at(series: &[Option<f64>], index: usize) -> Option<f64> {
    let last = series.len().checked_sub(1)?;
    series[index.min(last)]
}
