//! Gemini API のリクエスト/レスポンス型
//!
//! `generateContent` エンドポイント用。送受信処理そのものは
//! [`crate::client::Transport`] の実装側（fetch / reqwest）が持つ。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: Value,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// エラーレスポンス `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// generateContent のURL（APIキーはクエリに付ける）
pub fn endpoint_url(base: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/{}:generateContent?key={}",
        base.trim_end_matches('/'),
        model,
        api_key
    )
}

impl GenerateContentResponse {
    /// 最初の候補のテキストパートを連結して返す
    ///
    /// ブロックされた場合や候補・テキストがない場合はサービスエラー
    pub fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::transport(format!("prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::transport("Empty response: no candidates"))?;

        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::transport(format!(
                "Empty response (finishReason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

/// レスポンス本文を解釈してモデル出力テキストを取り出す
///
/// 本文自体がJSONでない場合はエンドポイント側の異常なのでサービスエラー扱い
pub fn response_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::transport(format!("unreadable Gemini response: {}", e)))?;
    response.into_text()
}

/// 非2xxレスポンスをサービスエラーに変換
pub fn service_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) if !envelope.error.message.is_empty() => {
                format!("{}: {}", code, envelope.error.message)
            }
            _ if !envelope.error.message.is_empty() => envelope.error.message,
            _ => format!("HTTP {}", status),
        },
        Err(_) => format!("HTTP {}", status),
    };
    Error::Service { status: Some(status), message }
}
