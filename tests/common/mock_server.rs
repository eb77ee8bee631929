//! Mock page-side bridge and image host.

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockBridge {
    pub server: MockServer,
}

impl MockBridge {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Report a surface with the given id
    pub async fn mock_surface(&self, id: &str) {
        Mock::given(method("GET"))
            .and(path("/surface"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id })))
            .mount(&self.server)
            .await;
    }

    /// Report the given raw swatches
    pub async fn mock_palette(&self, swatches: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/palette"))
            .respond_with(ResponseTemplate::new(200).set_body_json(swatches))
            .mount(&self.server)
            .await;
    }

    /// Accept select and pointer posts
    pub async fn mock_actions(&self) {
        for endpoint in ["/select", "/pointer"] {
            Mock::given(method("POST"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(204))
                .mount(&self.server)
                .await;
        }
    }

    /// Serve raw bytes at `endpoint`
    pub async fn mock_bytes(&self, endpoint: &str, bytes: Vec<u8>, content_type: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(bytes)
                    .insert_header("content-type", content_type),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error status
    pub async fn mock_error(&self, endpoint: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Paths and JSON bodies of POSTs received so far, in order
    pub async fn posted(&self) -> Vec<(String, serde_json::Value)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| {
                let body = serde_json::from_slice(&r.body).unwrap_or(serde_json::Value::Null);
                (r.url.path().to_string(), body)
            })
            .collect()
    }
}
