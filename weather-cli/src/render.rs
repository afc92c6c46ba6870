use chrono::NaiveDate;
use weather_core::{
    DashboardState, TemperatureUnit, WeatherCondition, WeatherReport,
    format::{
        format_forecast_date, format_humidity, format_long_date, format_pressure,
        format_visibility_km, format_wind,
    },
};

/// Terminal text for a dashboard state.
pub fn render_state(state: &DashboardState, unit: TemperatureUnit, today: NaiveDate) -> String {
    match state {
        DashboardState::Idle => String::new(),
        DashboardState::Loading { city } => format!("Loading weather data for {city}...\n"),
        DashboardState::Loaded(report) => render_report(report, unit, today),
        DashboardState::Failed(message) => format!("Error: {message}\n"),
    }
}

pub fn render_report(report: &WeatherReport, unit: TemperatureUnit, today: NaiveDate) -> String {
    let current = &report.current;
    let condition = WeatherCondition::from_code(current.weather_code);
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", current.city, format_long_date(today)));
    out.push_str(&format!(
        "  {}  {}  {}\n\n",
        condition.icon(),
        unit.format(current.temperature_c),
        condition.description()
    ));
    out.push_str(&stat_line("Wind", format_wind(current.wind_speed_kmh)));
    out.push_str(&stat_line("Humidity", format_humidity(current.humidity_pct)));
    out.push_str(&stat_line("Visibility", format_visibility_km(current.visibility_m)));
    out.push_str(&stat_line("Pressure", format_pressure(current.pressure_hpa)));

    if !report.forecast.is_empty() {
        out.push_str("\n7-Day Forecast\n");
        for day in &report.forecast {
            let condition = WeatherCondition::from_optional_code(day.weather_code);
            out.push_str(&format!(
                "  {:<13}{}  {:<14}{} / {}\n",
                format_forecast_date(&day.date),
                condition.icon(),
                condition.description(),
                unit.format_opt(day.max_temp_c),
                unit.format_opt(day.min_temp_c),
            ));
        }
    }

    out
}

fn stat_line(label: &str, value: String) -> String {
    format!("  {label:<12}{value}\n")
}
