//! reqwest による Transport 実装

use async_trait::async_trait;
use lvm_bug_reader_common::{service_error, Error, Result, Transport};

/// reqwest経由でGemini APIへPOSTする
///
/// タイムアウトはreqwestのデフォルトのまま（明示的には設定しない）
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String> {
        // URLにAPIキーが含まれるのでエラーメッセージからは外す
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini API returned an error status");
            return Err(service_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}
