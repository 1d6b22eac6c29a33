//! OpenWeatherProvider against a mock HTTP server.

use weather_core::{
    Coordinates, Endpoint, OpenWeatherProvider, Query, WeatherError, WeatherProvider,
    WeatherSession,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PARIS: Coordinates = Coordinates {
    latitude: 48.85,
    longitude: 2.35,
};

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), &server.uri())
}

fn query(text: &str) -> Query {
    Query::parse(text).expect("non-empty query")
}

fn paris_weather() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "dt": 1709380800,
        "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 55 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
    })
}

fn paris_forecast() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "cnt": 3,
        "list": [
            { "dt": 1709391600, "main": { "temp": 15.8, "humidity": 60 }, "weather": [{ "icon": "02d" }] },
            { "dt": 1709380800, "main": { "temp": 10.2, "humidity": 70 }, "weather": [{ "icon": "01d" }] },
            { "dt": 1709402400, "main": { "temp": 9.9, "humidity": 80 }, "weather": [{ "icon": "10n" }] }
        ],
        "city": { "name": "Paris", "country": "FR" }
    })
}

async fn mount_paris(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Paris", "lat": 48.85, "lon": 2.35, "country": "FR" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_weather()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn geocode_sends_limit_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Paris", "lat": 48.85, "lon": 2.35, "country": "FR" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let found = provider(&server).geocode(&query("Paris")).await.unwrap();
    assert_eq!(found, Some(PARIS));
}

#[tokio::test]
async fn geocode_empty_array_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let found = provider(&server).geocode(&query("Atlantis")).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn current_weather_uses_metric_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_weather()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server).current(PARIS).await.unwrap();
    assert_eq!(current.city_name, "Paris");
    assert_eq!(current.description, "clear sky");
    assert_eq!(current.icon_code.as_deref(), Some("01d"));
    assert_eq!(current.temperature, 18.4);
    assert_eq!(current.feels_like, 17.9);
}

#[tokio::test]
async fn forecast_keeps_every_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .mount(&server)
        .await;

    let forecast = provider(&server).forecast(PARIS).await.unwrap();
    let stamps: Vec<i64> = forecast.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![1709391600, 1709380800, 1709402400]);
    assert_eq!(forecast[2].humidity, 80);
    assert_eq!(forecast[2].icon_code.as_deref(), Some("10n"));
}

#[tokio::test]
async fn unauthorized_maps_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let err = provider(&server).current(PARIS).await.unwrap_err();
    match err {
        WeatherError::Status { endpoint, status, body } => {
            assert_eq!(endpoint, Endpoint::CurrentWeather);
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server).forecast(PARIS).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse { endpoint: Endpoint::Forecast, .. }));
}

#[tokio::test]
async fn session_submit_end_to_end() {
    let server = MockServer::start().await;
    mount_paris(&server).await;

    let mut session = WeatherSession::new(Box::new(provider(&server)));
    session.set_query("Paris");
    let outcome = session.submit().await.unwrap();

    assert_eq!(outcome.failures().count(), 0);
    let current = session.current().expect("current conditions");
    assert_eq!(current.city_name, "Paris");
    assert_eq!(session.forecast().len(), 3);
}

#[tokio::test]
async fn session_unknown_city_skips_follow_up_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_weather()))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = WeatherSession::new(Box::new(provider(&server)));
    session.set_query("Atlantis");

    let err = session.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "invalid city name \"Atlantis\"");
    assert!(session.current().is_none());
}
