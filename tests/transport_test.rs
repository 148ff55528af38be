//! reqwest Transport をローカルのスタブサーバーで検証

use lvm_bug_reader::analyze_image_file;
use lvm_bug_reader::error::BugReaderError;
use lvm_bug_reader::transport::ReqwestTransport;
use lvm_bug_reader_common::{AnalysisClient, ClientConfig, Error, ErrorKind, ImageRecord};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tempfile::tempdir;
use tokio::task::JoinHandle;

/// 1リクエストだけ受けて決め打ちのレスポンスを返す。受信したリクエスト全文を返す。
async fn stub_server(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 8192];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            if request_complete(&received) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&received).to_string()
    });

    (format!("http://{}/v1beta/models", addr), handle)
}

fn request_complete(received: &[u8]) -> bool {
    let text = String::from_utf8_lossy(received);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    received.len() >= header_end + 4 + content_length
}

fn client(api_base: &str) -> AnalysisClient<ReqwestTransport> {
    let config = ClientConfig::new("stub-key").unwrap().with_api_base(api_base);
    AnalysisClient::new(config, ReqwestTransport::new())
}

fn image() -> ImageRecord {
    ImageRecord::from_bytes("image/png", b"\x89PNG\r\n\x1a\n", ()).unwrap()
}

#[tokio::test]
async fn test_analyze_against_stub_server() {
    let model_output = json!({
        "analysisA": {"bugId": "LVM-31313", "stringIds": ["RingCentral.app.title"]},
        "analysisB": {"globalChecking": "No", "actionableRecommendations": ["Update termbase"]}
    })
    .to_string();
    let body = json!({"candidates": [{"content": {"parts": [{"text": model_output}]}}]}).to_string();
    let (base, server) = stub_server("200 OK", body).await;

    let result = client(&base).analyze(&image()).await.unwrap();
    assert_eq!(result.analysis_a.bug_id, "LVM-31313");
    assert_eq!(result.analysis_a.vendor_task, "blank");
    assert_eq!(result.analysis_b.actionable_recommendations, vec!["Update termbase"]);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent?key=stub-key HTTP/1.1"));
    let (_, payload) = request.split_once("\r\n\r\n").unwrap();
    let payload: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(payload["contents"][0]["parts"][0]["inline_data"]["mime_type"], "image/png");
    assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn test_http_error_is_service_error() {
    let body = json!({"error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}}).to_string();
    let (base, server) = stub_server("403 Forbidden", body).await;

    let err = client(&base).analyze(&image()).await.unwrap_err();
    match &err {
        Error::Service { status, message } => {
            assert_eq!(*status, Some(403));
            assert!(message.contains("API key not valid."));
        }
        other => panic!("Expected Service error, got {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Service);
    server.await.unwrap();
}

#[tokio::test]
async fn test_non_json_model_output_is_invalid_response() {
    let body = json!({"candidates": [{"content": {"parts": [{"text": "```json\n{}\n```"}]}}]}).to_string();
    let (base, server) = stub_server("200 OK", body).await;

    let err = client(&base).analyze(&image()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_hides_api_key() {
    // 接続先なし
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/v1beta/models", addr))
        .analyze(&image())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(!err.to_string().contains("stub-key"));
}

#[tokio::test]
async fn test_analyze_image_file_sends_file_bytes() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("LVM-31313.png");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

    let model_output = json!({"analysisA": {"bugId": "LVM-31313"}, "analysisB": {}}).to_string();
    let body = json!({"candidates": [{"content": {"parts": [{"text": model_output}]}}]}).to_string();
    let (base, server) = stub_server("200 OK", body).await;

    let result = analyze_image_file(&client(&base), &path).await.unwrap();
    assert_eq!(result.analysis_a.bug_id, "LVM-31313");
    assert_eq!(result.analysis_b.global_checking, "blank");

    let request = server.await.unwrap();
    let (_, payload) = request.split_once("\r\n\r\n").unwrap();
    let payload: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(payload["contents"][0]["parts"][0]["inline_data"]["data"], "iVBORw0KGgo=");
}

#[tokio::test]
async fn test_analyze_image_file_rejects_text_before_sending() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not a screenshot").unwrap();

    // 接続先なし: 送信していればサービスエラーになる
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = analyze_image_file(&client(&format!("http://{}/v1beta/models", addr)), &path)
        .await
        .unwrap_err();
    assert!(matches!(err, BugReaderError::UnsupportedImage(_)));

    let missing = dir.path().join("missing.png");
    let err = analyze_image_file(&client(&format!("http://{}/v1beta/models", addr)), &missing)
        .await
        .unwrap_err();
    assert!(matches!(err, BugReaderError::FileNotFound(_)));
}
