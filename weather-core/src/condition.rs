use serde::{Deserialize, Serialize};

/// Sky/precipitation bucket derived from a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    SnowFall,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Classify a weather code using half-open ranges.
    ///
    /// Total over `i32`: each boundary code (0, 3, 48, 56, 66, 70, 80, 83, 86, 90)
    /// lands in the bucket it opens; negative codes are `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1..=2 => Self::PartlyCloudy,
            3..=47 => Self::Cloudy,
            48..=55 => Self::Fog,
            56..=65 => Self::Drizzle,
            66..=69 => Self::Rain,
            70..=79 => Self::Snow,
            80..=82 => Self::RainShowers,
            83..=85 => Self::SnowShowers,
            86..=89 => Self::SnowFall,
            90.. => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// `Unknown` when the provider sent no code.
    pub fn from_optional_code(code: Option<i32>) -> Self {
        code.map_or(Self::Unknown, Self::from_code)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::SnowFall => "Snow fall",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "N/A",
        }
    }

    /// Glyph shown next to the description.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::ClearSky => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::RainShowers => "☔",
            Self::SnowShowers => "🌨️",
            Self::SnowFall => "☃️",
            Self::Thunderstorm => "⚡",
            Self::Unknown => "❔",
        }
    }
}

/// Map a weather code to its `(icon, description)` pair.
pub fn classify_weather_code(code: i32) -> (&'static str, &'static str) {
    let condition = WeatherCondition::from_code(code);
    (condition.icon(), condition.description())
}
