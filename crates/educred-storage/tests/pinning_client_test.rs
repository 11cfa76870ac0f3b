//! Contract tests for the pinning client and gateway reads.
//!
//! Uses wiremock to simulate the pinning API and a public gateway.

use educred_storage::{gateway, ContentStore, PinningClient, StorageConfig, StorageError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> PinningClient {
    let config = StorageConfig::local_mock(&mock_server.uri(), "test-token").unwrap();
    PinningClient::new(config).unwrap()
}

#[tokio::test]
async fn store_uploads_and_returns_cid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("X-NAME", "cert.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"cid": "bafybeiexample1"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let cid = client.store(b"certificate bytes", "cert.txt").await.unwrap();
    assert_eq!(cid.as_str(), "bafybeiexample1");
}

#[tokio::test]
async fn store_without_token_fails_unavailable_before_io() {
    let mock_server = MockServer::start().await;

    // No mock mounted: any request would 404, but none must be sent.
    let mut config = StorageConfig::local_mock(&mock_server.uri(), "unused").unwrap();
    config.api_token = None;
    let client = PinningClient::new(config).unwrap();
    assert!(!client.has_token());

    let result = client.store(b"bytes", "cert.txt").await;
    assert!(matches!(result, Err(StorageError::Unavailable)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_surfaces_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(507).set_body_string("storage quota exceeded"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    match client.store(b"bytes", "cert.txt").await.unwrap_err() {
        StorageError::ApiError { status, body, .. } => {
            assert_eq!(status, 507);
            assert!(body.contains("quota"));
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}

#[tokio::test]
async fn store_rejects_empty_cid_in_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cid": ""})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.store(b"bytes", "cert.txt").await;
    assert!(matches!(result, Err(StorageError::BadResponse { .. })));
}

#[tokio::test]
async fn store_metadata_wraps_document_as_metadata_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("X-NAME", "metadata.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"cid": "bafybeimeta1"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let meta = educred_core::CredentialMetadata::for_course(
        "Blockchain Fundamentals",
        "MIT",
        "https://w3s.link/ipfs/bafybeiexample1",
    );
    let cid = client.store_metadata(&meta).await.unwrap();
    assert_eq!(cid.as_str(), "bafybeimeta1");
}

#[tokio::test]
async fn fetch_metadata_decodes_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ipfs/bafybeimeta1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Blockchain Fundamentals Certificate",
            "description": "Academic credential issued by MIT",
            "image": "https://w3s.link/ipfs/bafybeiexample1",
            "attributes": [{"trait_type": "Institution", "value": "MIT"}]
        })))
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::new();
    let url = format!("{}/ipfs/bafybeimeta1", mock_server.uri());
    let meta = gateway::fetch_metadata_at(&http, &url).await.unwrap();
    assert_eq!(meta.name, "Blockchain Fundamentals Certificate");
    assert_eq!(meta.attributes.len(), 1);
}

#[tokio::test]
async fn fetch_metadata_fails_on_non_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ipfs/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::new();
    let url = format!("{}/ipfs/missing", mock_server.uri());
    match gateway::fetch_metadata_at(&http, &url).await.unwrap_err() {
        StorageError::FetchFailed { detail, .. } => assert!(detail.contains("404")),
        other => panic!("expected FetchFailed, got: {other:?}"),
    }
}
