use serde::{Deserialize, Serialize};

/// First geocoding match for a city name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub resolved_name: String,
}

/// Conditions shown in the header card.
///
/// Humidity, visibility and pressure come from the hourly series and are
/// `None` when the provider has no sample for the selected hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub humidity_pct: Option<f64>,
    pub visibility_m: Option<f64>,
    pub pressure_hpa: Option<f64>,
}

/// One forecast card. Values are `None` where the provider sent `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO date, e.g. `2026-10-20`.
    pub date: String,
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Result of one successful search. Current conditions and forecast are
/// always replaced together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyForecast>,
}

/// Forecast endpoint body, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastPayload {
    pub current_weather: RawCurrentWeather,
    #[serde(default)]
    pub hourly: RawHourly,
    #[serde(default)]
    pub daily: RawDaily,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawHourly {
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
    pub pressure_msl: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub weathercode: Vec<Option<i32>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
}
