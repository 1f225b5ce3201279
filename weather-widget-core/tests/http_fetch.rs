//! Integration tests for the HTTP fetch path using wiremock.
//!
//! These run the real `reqwest` transport against a mock provider endpoint.

use std::sync::Arc;

use weather_widget_core::{
    FetchError, HttpTransport, TransportError, UnitSystem, WeatherFetcher, WeatherWidget,
    WidgetConfig, WidgetOptions,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_day(date: &str, code: &str, high: &str, low: &str, text: &str) -> serde_json::Value {
    serde_json::json!({ "code": code, "date": date, "day": "", "high": high, "low": low, "text": text })
}

/// A provider response in the shape the public endpoint returns.
fn provider_response() -> serde_json::Value {
    serde_json::json!({
        "query": {
            "count": 1,
            "created": "2026-10-19T12:00:00Z",
            "lang": "en-US",
            "results": {
                "channel": {
                    "title": "Yahoo! Weather - Waterloo, ON, CA",
                    "description": "Yahoo! Weather for Waterloo, ON, CA",
                    "location": { "city": "Waterloo", "country": "Canada", "region": " ON" },
                    "wind": { "chill": "28", "direction": "270", "speed": "8.5" },
                    "atmosphere": { "humidity": "80", "pressure": "1015.0", "rising": "0", "visibility": "16.1" },
                    "astronomy": { "sunrise": "7:32 am", "sunset": "6:31 pm" },
                    "item": {
                        "title": "Conditions for Waterloo, ON, CA at 08:00 AM EDT",
                        "condition": { "code": "32", "date": "Mon, 19 Oct 2026 08:00 AM EDT", "temp": "68.5", "text": "Sunny" },
                        "forecast": [
                            forecast_day("19 Oct 2026", "32", "70", "50", "Sunny"),
                            forecast_day("20 Oct 2026", "30", "66", "48", "Partly Cloudy"),
                            forecast_day("21 Oct 2026", "12", "59", "45", "Rain"),
                        ]
                    }
                }
            }
        }
    })
}

fn config(units: UnitSystem, days: i64) -> WidgetConfig {
    WidgetConfig::from_options(&WidgetOptions {
        location: Some("Waterloo, ON".into()),
        forecast_days: Some(days),
        units: Some(units),
        ..Default::default()
    })
}

fn fetcher(server: &MockServer) -> WeatherFetcher {
    let transport = HttpTransport::new().unwrap();
    WeatherFetcher::new(Arc::new(transport)).with_endpoints([format!("{}/v1/public/yql", server.uri())])
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .and(query_param("format", "json"))
        .and(query_param(
            "q",
            "select * from weather.forecast where woeid in \
             (select woeid from geo.places(1) where text='Waterloo, ON') AND u='c'",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let weather = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 2)).await.unwrap();

    assert_eq!(weather.location, "Waterloo, Canada");
    assert_eq!(weather.today.temp_now, 69);
    assert_eq!(weather.today.icon_code, "weather-icon-sun");
    assert_eq!(weather.today.sunrise, "7:32 AM");
    assert_eq!(weather.forecast.len(), 3);
    assert_eq!(weather.forecast[2].icon_code, "weather-icon-rain");
}

#[tokio::test]
async fn test_fetch_imperial_sends_fahrenheit_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .and(query_param(
            "q",
            "select * from weather.forecast where woeid in \
             (select woeid from geo.places(1) where text='Waterloo, ON') AND u='f'",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let weather = fetcher(&mock_server).fetch(&config(UnitSystem::Imperial, 0)).await.unwrap();
    assert_eq!(weather.forecast.len(), 1);
}

#[tokio::test]
async fn test_fetch_zero_results() {
    let mock_server = MockServer::start().await;
    let empty = serde_json::json!({ "query": { "count": 0, "created": "2026-10-19T12:00:00Z", "results": null } });

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty.clone()))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 2)).await.unwrap_err();

    match err {
        FetchError::Provider { payload } => assert_eq!(payload, empty),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 2)).await.unwrap_err();

    match err {
        FetchError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 2)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::Json(_))));
}

#[tokio::test]
async fn test_fetch_short_forecast_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
        .mount(&mock_server)
        .await;

    // Three forecast entries cannot satisfy five requested days.
    let err = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 5)).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_fetch_empty_object_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server).fetch(&config(UnitSystem::Metric, 2)).await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)), "got {err:?}");
}

#[test]
fn test_mapper_is_reached_through_its_module() {
    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let weather =
        weather_widget_core::mapper::map(&provider_response(), &config(UnitSystem::Metric, 2), today).unwrap();
    assert_eq!(weather.location, "Waterloo, Canada");
}

#[tokio::test]
async fn test_widget_renders_fetched_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/public/yql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_response()))
        .mount(&mock_server)
        .await;

    let mut widget = WeatherWidget::new(config(UnitSystem::Metric, 2), fetcher(&mock_server));
    let html = widget.refresh_and_render().await.unwrap();

    assert!(html.contains("Waterloo, Canada"));
    assert!(html.contains("Viento 8.5 km/h W"));
    assert!(html.contains("69<sup>&#176;C</sup>"));
    assert!(widget.weather().is_some());
}
