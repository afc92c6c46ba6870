//! Integration tests for the Open-Meteo provider and dashboard using wiremock.

use std::time::Duration;

use weather_core::{
    Dashboard, DashboardState, OpenMeteoProvider, WeatherError, WeatherLookupClient,
    format::round_temperature,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherLookupClient {
    let provider = OpenMeteoProvider::new(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
    );
    WeatherLookupClient::new(Box::new(provider))
}

fn geocoding_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 1269843,
            "name": name,
            "latitude": 17.38405,
            "longitude": 78.45636,
            "country": "India"
        }],
        "generationtime_ms": 0.6
    })
}

fn forecast_body(days: usize) -> serde_json::Value {
    let dates: Vec<String> = (0..days).map(|d| format!("2026-10-{:02}", 19 + d)).collect();
    serde_json::json!({
        "latitude": 17.375,
        "longitude": 78.5,
        "timezone": "Asia/Kolkata",
        "current_weather": {
            "temperature": 27.6,
            "windspeed": 11.2,
            "winddirection": 245,
            "weathercode": 3,
            "time": "2026-10-19T14:00"
        },
        "hourly": {
            "time": vec!["2026-10-19T00:00"; 24],
            "temperature_2m": vec![25.0; 24],
            "weathercode": vec![3; 24],
            "relative_humidity_2m": vec![68; 24],
            "visibility": vec![24140.0; 24],
            "pressure_msl": vec![1011.4; 24]
        },
        "daily": {
            "time": dates,
            "weathercode": vec![61; days],
            "temperature_2m_max": vec![30.1; days],
            "temperature_2m_min": vec![21.3; days]
        }
    })
}

async fn mount_geocoding(server: &MockServer, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", city))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_hyderabad_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "17.38405"))
        .and(query_param("longitude", "78.45636"))
        .and(query_param("current_weather", "true"))
        .and(query_param(
            "hourly",
            "temperature_2m,weathercode,relative_humidity_2m,visibility,pressure_msl",
        ))
        .and(query_param("daily", "weathercode,temperature_2m_max,temperature_2m_min"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(16)))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).search("Hyderabad").await.unwrap();

    assert_eq!(report.current.city, "Hyderabad");
    assert_eq!(round_temperature(report.current.temperature_c), 28);
    assert_eq!(report.current.wind_direction_deg, 245.0);
    assert_eq!(report.current.humidity_pct, Some(68.0));
    assert_eq!(report.current.visibility_m, Some(24140.0));
    assert_eq!(report.current.pressure_hpa, Some(1011.4));
    assert_eq!(report.forecast.len(), 7);
    assert_eq!(report.forecast[0].date, "2026-10-20");
}

#[tokio::test]
async fn test_city_name_with_space_and_accent_is_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "São Paulo", "latitude": -23.5475, "longitude": -46.63611 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let place = client_for(&server).resolve_city(" São Paulo ").await.unwrap();

    assert_eq!(place.resolved_name, "São Paulo");
    assert_eq!(place.latitude, -23.5475);
    assert_eq!(place.longitude, -46.63611);
}

#[tokio::test]
async fn test_null_daily_samples_keep_current_conditions() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    let mut body = forecast_body(8);
    body["daily"]["weathercode"][1] = serde_json::Value::Null;
    body["daily"]["temperature_2m_max"][1] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let report = client_for(&server).search_at_hour("Hyderabad", 12).await.unwrap();

    assert_eq!(round_temperature(report.current.temperature_c), 28);
    assert_eq!(report.forecast.len(), 7);
    assert_eq!(report.forecast[0].weather_code, None);
    assert_eq!(report.forecast[0].max_temp_c, None);
    assert_eq!(report.forecast[0].min_temp_c, Some(21.3));
    assert_eq!(report.forecast[1].weather_code, Some(61));
}

#[tokio::test]
async fn test_short_daily_series_gives_shorter_forecast() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(4)))
        .mount(&server)
        .await;

    let report = client_for(&server).search_at_hour("Hyderabad", 9).await.unwrap();
    assert_eq!(report.forecast.len(), 3);
}

#[tokio::test]
async fn test_unknown_city_skips_forecast_call() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        "Nonexistentville123",
        serde_json::json!({ "results": [], "generationtime_ms": 0.3 }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(8)))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).search("Nonexistentville123").await.unwrap_err();

    assert!(matches!(err, WeatherError::NotFound));
    assert_eq!(err.to_string(), "City not found. Please try again.");
}

#[tokio::test]
async fn test_missing_results_field_is_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Nowhere", serde_json::json!({ "generationtime_ms": 0.3 })).await;

    let err = client_for(&server).resolve_city("Nowhere").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound));
}

#[tokio::test]
async fn test_geocoding_error_status_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server).resolve_city("Hyderabad").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound));
}

#[tokio::test]
async fn test_blank_city_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).search("   ").await.unwrap_err();
    assert!(matches!(err, WeatherError::Validation));
}

#[tokio::test]
async fn test_forecast_error_uses_reason() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Cannot initialize WeatherVariable from invalid String value"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).search("Hyderabad").await.unwrap_err();

    match err {
        WeatherError::Upstream(msg) => {
            assert_eq!(msg, "Cannot initialize WeatherVariable from invalid String value")
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forecast_error_without_reason_uses_fallback() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search("Hyderabad").await.unwrap_err();

    assert!(matches!(err, WeatherError::Upstream(_)));
    assert_eq!(err.to_string(), "Failed to fetch weather data.");
}

#[tokio::test]
async fn test_malformed_forecast_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "daily": {} })))
        .mount(&server)
        .await;

    let err = client_for(&server).search("Hyderabad").await.unwrap_err();
    assert!(matches!(err, WeatherError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let provider = OpenMeteoProvider::new(
        "http://127.0.0.1:9/v1/search",
        "http://127.0.0.1:9/v1/forecast",
    );
    let client = WeatherLookupClient::new(Box::new(provider));

    let err = client.search("Hyderabad").await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_dashboard_repeated_search_is_idempotent() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(8)))
        .expect(2)
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::new(client_for(&server));

    let first = dashboard.search("Hyderabad").await;
    let second = dashboard.search("Hyderabad").await;

    assert!(matches!(first, DashboardState::Loaded(_)));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_dashboard_publishes_loading_while_in_flight() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocoding_body("Hyderabad"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(8)))
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::new(client_for(&server));
    let mut rx = dashboard.subscribe();

    let observe = async {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    };

    let (final_state, seen) = tokio::join!(dashboard.search("Hyderabad"), observe);

    assert_eq!(seen, DashboardState::Loading { city: "Hyderabad".into() });
    assert!(matches!(final_state, DashboardState::Loaded(_)));
}

#[tokio::test]
async fn test_dashboard_failure_after_success_clears_report() {
    let server = MockServer::start().await;
    mount_geocoding(&server, "Hyderabad", geocoding_body("Hyderabad")).await;
    mount_geocoding(&server, "Nonexistentville123", serde_json::json!({ "results": [] })).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(8)))
        .expect(1)
        .mount(&server)
        .await;

    let mut dashboard = Dashboard::new(client_for(&server));

    assert!(dashboard.search("Hyderabad").await.report().is_some());

    let state = dashboard.search("Nonexistentville123").await;
    assert_eq!(state, DashboardState::Failed("City not found. Please try again.".into()));
    assert_eq!(dashboard.state(), state);
}
