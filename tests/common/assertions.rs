//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a JSON error body with the given status
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);

    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], expected.as_u16());
    assert!(
        json["error"].as_str().is_some_and(|e| !e.is_empty()),
        "Expected an error message, got {json}"
    );
}
