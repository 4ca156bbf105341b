//! Contract tests for RelayClient against a mocked image host.
//!
//! ## Behaviours Tested
//!
//! | Case | Test |
//! |------|------|
//! | success reply | `upload_returns_hosted_url` |
//! | form body shape | `upload_sends_key_and_base64_image` |
//! | remote failure | `upload_surfaces_remote_message` |
//! | success without URL | `upload_without_url_is_missing_url` |
//! | non-2xx / non-JSON / timeout / refused | `upload_*_is_transport_error` |
//! | local rejection | `unsupported_extension_never_calls_host`, `empty_file_never_calls_host` |

use std::time::Duration;

use idcard_relay::{PhotoUpload, RelayClient, RelayConfig, RelayError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPLOAD_PATH: &str = "/1/upload";

fn test_client(mock_server: &MockServer) -> RelayClient {
    let endpoint = format!("{}{UPLOAD_PATH}", mock_server.uri());
    RelayClient::new(RelayConfig::local_mock(&endpoint, "test-key").unwrap()).unwrap()
}

fn png(bytes: &[u8]) -> PhotoUpload {
    PhotoUpload::new("photo.png", bytes.to_vec())
}

// ── Successful relay ─────────────────────────────────────────────────

#[tokio::test]
async fn upload_returns_hosted_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"url": "https://img/x.png"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let url = client.upload(&png(b"0123456789")).await.unwrap();
    assert_eq!(url, "https://img/x.png");
}

#[tokio::test]
async fn upload_sends_key_and_base64_image() {
    let mock_server = MockServer::start().await;

    // "abcdefghi" encodes without padding or URL-escaped characters.
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("key=test-key"))
        .and(body_string_contains("image=YWJjZGVmZ2hp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"url": "https://img/abc.png"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let upload = PhotoUpload::new("Scan.JPEG", b"abcdefghi".to_vec());
    assert_eq!(client.upload(&upload).await.unwrap(), "https://img/abc.png");
}

// ── Remote-reported failures ─────────────────────────────────────────

#[tokio::test]
async fn upload_surfaces_remote_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": {"message": "bad key"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    match &err {
        RelayError::Rejected { message } => assert_eq!(message, "bad key"),
        other => panic!("expected Rejected, got: {other:?}"),
    }
    assert!(err.to_string().contains("bad key"));
}

#[tokio::test]
async fn upload_without_url_is_missing_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"id": "abc"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    assert!(matches!(err, RelayError::MissingUrl), "got: {err:?}");
}

// ── Transport failures ───────────────────────────────────────────────

#[tokio::test]
async fn upload_server_error_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": true,
            "data": {"url": "https://img/never.png"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    assert!(matches!(err, RelayError::Transport { .. }), "got: {err:?}");
    assert!(err
        .to_string()
        .starts_with("Unable to upload the photo at the moment. "));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn upload_non_json_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    assert!(matches!(err, RelayError::Transport { .. }), "got: {err:?}");
}

#[tokio::test]
async fn upload_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(serde_json::json!({"success": true, "data": {"url": "u"}})),
        )
        .mount(&mock_server)
        .await;

    let mut config =
        RelayConfig::local_mock(&format!("{}{UPLOAD_PATH}", mock_server.uri()), "k").unwrap();
    config.timeout_secs = 1;
    let client = RelayClient::new(config).unwrap();

    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    match err {
        RelayError::Transport { source } => assert!(source.is_timeout()),
        other => panic!("expected Transport, got: {other:?}"),
    }
}

#[tokio::test]
async fn upload_connection_refused_is_transport_error() {
    // Guaranteed-closed port.
    let config = RelayConfig::local_mock("http://127.0.0.1:1/1/upload", "k").unwrap();
    let client = RelayClient::new(config).unwrap();

    let err = client.upload(&png(b"0123456789")).await.unwrap_err();
    assert!(matches!(err, RelayError::Transport { .. }), "got: {err:?}");
}

// ── Local validation (no network) ────────────────────────────────────

#[tokio::test]
async fn unsupported_extension_never_calls_host() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    for name in ["photo.bmp", "photo", "photo.PNG.txt"] {
        let err = client
            .upload(&PhotoUpload::new(name, b"0123456789".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedFormat { .. }), "got: {err:?}");
        assert_eq!(
            err.to_string(),
            "Unsupported image format. Please upload PNG, JPG, JPEG, GIF, or WEBP files."
        );
    }
}

#[tokio::test]
async fn empty_file_never_calls_host() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.upload(&png(b"")).await.unwrap_err();
    assert!(matches!(err, RelayError::EmptyFile), "got: {err:?}");
    assert_eq!(
        err.to_string(),
        "Uploaded photo is empty. Please select a valid image."
    );
}
