//! Rancher client tests against a mock management API
//!
//! A fresh two-cluster install has four projects (Default and System per
//! cluster) that carry only Rancher-managed metadata and no quotas.

mod common;

use common::*;
use rancher_client::QuotaScope;
use wiremock::matchers::{basic_auth, header, method, path, query_param};

// ============== Fresh install ==============

#[tokio::test]
async fn test_number_of_projects() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let count = client.number_of_projects().await.unwrap();
    assert_eq!(count, 4);
}

#[tokio::test]
async fn test_project_annotations_empty() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let annotations = client.project_annotations().await.unwrap();
    assert!(annotations.is_empty());
}

#[tokio::test]
async fn test_project_labels_empty() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let labels = client.project_labels().await.unwrap();
    assert!(labels.is_empty());
}

#[tokio::test]
async fn test_project_resource_quota_empty() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let quotas = client.project_resource_quota().await.unwrap();
    assert!(quotas.is_empty());
}

#[tokio::test]
async fn test_cluster_id_to_name_empty_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("clusters.json")))
        .expect(0)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let name = client.cluster_id_to_name("").await.unwrap();
    assert_eq!(name, "");
}

#[tokio::test]
async fn test_system_metadata_included_on_request() {
    let server = default_install().await;
    let config = ClientConfig {
        include_system_metadata: true,
        ..ClientConfig::new(&server.uri()).with_token(TEST_TOKEN)
    };
    let client = RancherClient::new(config).unwrap();

    let labels = client.project_labels().await.unwrap();
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[0].project_id, "local:p-4hd9k");
    assert_eq!(labels[0].cluster_name, "local");
    assert_eq!(labels[0].key, "authz.management.cattle.io/default-project");
}

// ============== Cluster names ==============

#[tokio::test]
async fn test_cluster_id_to_name_known() {
    let server = default_install().await;
    let client = create_test_client(&server);

    assert_eq!(client.cluster_id_to_name("c-m8q2x").await.unwrap(), "production");
    assert_eq!(client.cluster_id_to_name("local").await.unwrap(), "local");
}

#[tokio::test]
async fn test_cluster_id_to_name_from_project_id() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let name = client.cluster_id_to_name("c-m8q2x:p-8rkzv").await.unwrap();
    assert_eq!(name, "production");
}

#[tokio::test]
async fn test_cluster_id_to_name_unknown() {
    let server = default_install().await;
    let client = create_test_client(&server);

    assert_eq!(client.cluster_id_to_name("c-nope0").await.unwrap(), "");
    assert_eq!(client.cluster_id_to_name("::").await.unwrap(), "");
}

#[tokio::test]
async fn test_list_clusters() {
    let server = default_install().await;
    let client = create_test_client(&server);

    let clusters = client.list_clusters().await.unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[1].provider.as_deref(), Some("rke2"));
}

// ============== Projects with user metadata ==============

async fn metadata_install() -> MockServer {
    let server = MockServer::start().await;
    mount_fixture(&server, "/v3/projects", "projects_with_metadata.json").await;
    mount_fixture(&server, "/v3/clusters", "clusters.json").await;
    server
}

#[tokio::test]
async fn test_project_annotations_user_keys() {
    let server = metadata_install().await;
    let client = create_test_client(&server);

    let annotations = client.project_annotations().await.unwrap();
    assert_eq!(annotations.len(), 2);

    assert_eq!(annotations[0].key, "example.com/on-call");
    assert_eq!(annotations[0].value, "payments-oncall");
    assert_eq!(annotations[1].key, "team");
    assert_eq!(annotations[1].value, "billing");

    for annotation in &annotations {
        assert_eq!(annotation.project_id, "c-m8q2x:p-5vn7k");
        assert_eq!(annotation.project_name, "payments");
        assert_eq!(annotation.cluster_name, "production");
    }
}

#[tokio::test]
async fn test_project_labels_unknown_cluster() {
    let server = metadata_install().await;
    let client = create_test_client(&server);

    let labels = client.project_labels().await.unwrap();
    assert_eq!(labels.len(), 2);

    assert_eq!(labels[0].project_name, "payments");
    assert_eq!(labels[0].value, "prod");

    assert_eq!(labels[1].project_name, "legacy");
    assert_eq!(labels[1].cluster_id, "c-zzzzz");
    assert_eq!(labels[1].cluster_name, "");
    assert_eq!(labels[1].value, "dev");
}

#[tokio::test]
async fn test_project_resource_quota() {
    let server = metadata_install().await;
    let client = create_test_client(&server);

    let quotas = client.project_resource_quota().await.unwrap();
    assert_eq!(quotas.len(), 3);

    assert_eq!(quotas[0].scope, QuotaScope::Project);
    assert_eq!(quotas[0].resource, "limitsCpu");
    assert_eq!(quotas[0].limit, "4000m");
    assert_eq!(quotas[0].used, None);

    assert_eq!(quotas[1].resource, "pods");
    assert_eq!(quotas[1].used.as_deref(), Some("20"));

    assert_eq!(quotas[2].scope, QuotaScope::NamespaceDefault);
    assert_eq!(quotas[2].resource, "pods");
    assert_eq!(quotas[2].limit, "10");
    assert!(quotas.iter().all(|q| q.cluster_name == "production"));
}

#[tokio::test]
async fn test_no_projects_skips_cluster_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"type": "collection", "data": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("clusters.json")))
        .expect(0)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    assert_eq!(client.number_of_projects().await.unwrap(), 0);
    assert!(client.project_annotations().await.unwrap().is_empty());
}

// ============== Requests ==============

#[tokio::test]
async fn test_bearer_token_and_list_all() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/projects"))
        .and(query_param("limit", "-1"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("projects_default.json")),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    assert_eq!(client.number_of_projects().await.unwrap(), 4);
}

#[tokio::test]
async fn test_basic_auth_key_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .and(basic_auth("token-x2v9c", "t0psecret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("clusters.json")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        access_key: Some("token-x2v9c".to_string()),
        secret_key: Some("t0psecret".to_string()),
        ..ClientConfig::new(&server.uri())
    };
    let client = RancherClient::new(config).unwrap();

    assert_eq!(client.cluster_id_to_name("local").await.unwrap(), "local");
}

#[tokio::test]
async fn test_url_with_v3_suffix() {
    let server = default_install().await;
    let url = format!("{}/v3/", server.uri());
    let client = RancherClient::new(ClientConfig::new(&url).with_token(TEST_TOKEN)).unwrap();

    assert_eq!(client.base_url(), server.uri());
    assert_eq!(client.number_of_projects().await.unwrap(), 4);
}

// ============== Errors ==============

async fn failing_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_unauthorized() {
    let server = failing_server(401, r#"{"type":"error","status":"401"}"#).await;
    let client = create_test_client(&server);

    let result = client.number_of_projects().await;
    assert!(matches!(result, Err(ClientError::AuthFailed)));
}

#[tokio::test]
async fn test_not_found() {
    let server = failing_server(404, "").await;
    let client = create_test_client(&server);

    match client.list_clusters().await {
        Err(ClientError::NotFound(path)) => assert_eq!(path, "/v3/clusters"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error() {
    let server = failing_server(500, "boom").await;
    let client = create_test_client(&server);

    match client.project_labels().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let server = failing_server(200, "<html>login</html>").await;
    let client = create_test_client(&server);

    let result = client.project_resource_quota().await;
    assert!(matches!(result, Err(ClientError::Serialization(_))));
}

#[tokio::test]
async fn test_cluster_lookup_error_propagates() {
    let server = failing_server(503, "unavailable").await;
    let client = create_test_client(&server);

    let result = client.cluster_id_to_name("local").await;
    assert!(matches!(result, Err(ClientError::Api { status: 503, .. })));
}

#[tokio::test]
async fn test_cluster_listing_failure_after_projects() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/v3/projects", "projects_with_metadata.json").await;
    Mock::given(method("GET"))
        .and(path("/v3/clusters"))
        .respond_with(ResponseTemplate::new(500).set_body_string("cluster store unavailable"))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client.project_annotations().await;
    assert!(matches!(result, Err(ClientError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = ClientConfig::new("http://127.0.0.1:1").with_token(TEST_TOKEN);
    let client = RancherClient::new(config).unwrap();

    let result = client.number_of_projects().await;
    assert!(matches!(result, Err(ClientError::Http(_))));
}
