//! Common test utilities and helpers

#![allow(dead_code)]

pub use rancher_client::{ClientConfig, ClientError, RancherClient};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use std::path::PathBuf;
use wiremock::matchers::{method, path};

pub const TEST_TOKEN: &str = "token-x2v9c:t0psecret";

/// Load a JSON fixture from `tests/fixtures/`
pub fn load_fixture(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&contents).expect("fixture is not valid JSON")
}

/// Serve `fixture` for GET `route`
pub async fn mount_fixture(server: &MockServer, route: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}

/// Client pointed at the mock server with the test token
pub fn create_test_client(server: &MockServer) -> RancherClient {
    RancherClient::new(ClientConfig::new(&server.uri()).with_token(TEST_TOKEN))
        .expect("Failed to create client")
}

/// Mock server with the four default projects of a fresh two-cluster install
pub async fn default_install() -> MockServer {
    let server = MockServer::start().await;
    mount_fixture(&server, "/v3/projects", "projects_default.json").await;
    mount_fixture(&server, "/v3/clusters", "clusters.json").await;
    server
}
