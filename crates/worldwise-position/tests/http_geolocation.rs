//! Integration tests for `HttpGeolocationProvider`, using wiremock to stand in
//! for the IP-lookup endpoint.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use worldwise_core::Position;
use worldwise_position::{
    GeolocationError, GeolocationProvider, GeolocationSource, HttpGeolocationProvider,
};

fn test_provider(server: &MockServer) -> HttpGeolocationProvider {
    HttpGeolocationProvider::new(&format!("{}/json", server.uri()), 5, "worldwise-test/0.1")
        .expect("provider construction should not fail")
}

#[tokio::test]
async fn reads_long_field_names_and_ignores_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(header("user-agent", "worldwise-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.7",
            "city": "Lisbon",
            "latitude": 38.72,
            "longitude": -9.14
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coordinates = test_provider(&server)
        .current_position()
        .await
        .expect("lookup should succeed");

    assert_eq!(Position::from(coordinates), Position::new(38.72, -9.14));
}

#[tokio::test]
async fn reads_short_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "lat": 52.52, "lon": 13.405 })),
        )
        .mount(&server)
        .await;

    let coordinates = test_provider(&server).current_position().await.unwrap();

    assert_eq!(Position::from(coordinates), Position::new(52.52, 13.405));
}

#[tokio::test]
async fn non_success_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = test_provider(&server).current_position().await.unwrap_err();

    assert!(
        matches!(&err, GeolocationError::Unavailable(message) if message == "location service returned HTTP 429"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = test_provider(&server).current_position().await.unwrap_err();

    assert!(matches!(err, GeolocationError::Deserialize { .. }));
}

#[tokio::test]
async fn missing_coordinates_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "city": "Nowhere" })))
        .mount(&server)
        .await;

    let err = test_provider(&server).current_position().await.unwrap_err();

    assert!(matches!(err, GeolocationError::Deserialize { .. }));
}

#[tokio::test]
async fn source_records_http_lookup_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "latitude": 1.5, "longitude": 2.5 })),
        )
        .mount(&server)
        .await;

    let source = GeolocationSource::new(Some(test_provider(&server)), None);
    source.get_position().await;

    let state = source.state();
    assert!(!state.is_loading);
    assert_eq!(state.position, Some(Position::new(1.5, 2.5)));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn source_reports_http_failure_and_keeps_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = GeolocationSource::new(Some(test_provider(&server)), Some(Position::new(40.0, 0.0)));
    source.get_position().await;

    let state = source.state();
    assert!(!state.is_loading);
    assert_eq!(state.position, Some(Position::new(40.0, 0.0)));
    assert_eq!(
        state.error.as_deref(),
        Some("location service returned HTTP 503")
    );
}
