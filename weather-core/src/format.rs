//! Display formatting for reports: temperatures, units, dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// Temperature unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Rounded temperature with unit suffix, e.g. `22°C`.
    pub fn format(&self, celsius: f64) -> String {
        format!("{}{}", round_temperature(self.convert(celsius)), self.symbol())
    }

    /// Like [`format`](Self::format), but `N/A` for a missing reading.
    pub fn format_opt(&self, celsius: Option<f64>) -> String {
        celsius.map_or_else(|| NOT_AVAILABLE.to_string(), |c| self.format(c))
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Round to the nearest whole degree, halves away from zero.
pub fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}

/// Metres to kilometres with one decimal, e.g. `24140.0` → `24.1 km`.
pub fn format_visibility_km(metres: Option<f64>) -> String {
    match metres {
        Some(m) => format!("{:.1} km", m / 1000.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_wind(speed_kmh: f64) -> String {
    format!("{speed_kmh} km/h")
}

pub fn format_humidity(pct: Option<f64>) -> String {
    pct.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v}%"))
}

pub fn format_pressure(hpa: Option<f64>) -> String {
    hpa.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v} hPa"))
}

/// Short forecast-card date: `2026-10-20` → `Tue, Oct 20`.
///
/// Input that is not an ISO date is returned unchanged.
pub fn format_forecast_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%a, %b %-d").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Header date: `Monday, October 19, 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
