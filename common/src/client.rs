//! 解析クライアント
//!
//! 画像 + 固定プロンプト + 固定スキーマで generateContent を1回だけ呼び、
//! 結果を [`AnalysisResult`] にして返す。リトライ・キャッシュはしない。
//!
//! HTTP送信は [`Transport`] として外から渡す（ブラウザはfetch、ネイティブはreqwest、
//! テストはフェイク）。

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::gemini::{
    endpoint_url, response_text, Content, GenerateContentRequest, GenerationConfig, InlineData,
    Part, DEFAULT_MODEL, GEMINI_API_BASE,
};
use crate::image::ImageRecord;
use crate::parser::parse_analysis_response;
use crate::prompts::ANALYSIS_PROMPT;
use crate::schema::analysis_schema;
use crate::types::AnalysisResult;

/// HTTP送信の抽象
///
/// 実装は2xx以外を [`crate::gemini::service_error`] でエラーにすること。
/// ブラウザのfetchはSendでないので `?Send`。
#[async_trait(?Send)]
pub trait Transport {
    /// JSON本文をPOSTしてレスポンス本文を返す
    async fn post_json(&self, url: &str, body: String) -> Result<String>;
}

/// クライアント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl ClientConfig {
    /// APIキーから作成（空の場合は MissingApiKey）
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
        })
    }

    /// 環境変数などの取得結果（未設定はNone）から作成
    pub fn from_optional(api_key: Option<&str>) -> Result<Self> {
        Self::new(api_key.ok_or(Error::MissingApiKey)?)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// リクエスト本文を組み立てる（画像パート → プロンプトの順）
pub fn build_request<H>(image: &ImageRecord<H>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
                Part::Text { text: ANALYSIS_PROMPT.to_string() },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: analysis_schema(),
        },
    }
}

/// 解析クライアント
pub struct AnalysisClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> AnalysisClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 1枚の画像を解析
    ///
    /// 外部呼び出しはちょうど1回。失敗時のエラー種別:
    /// - 通信・HTTP・候補なし → [`Error::Service`]
    /// - モデル出力がJSONでない・グループ欠落 → [`Error::InvalidResponse`]
    pub async fn analyze<H>(&self, image: &ImageRecord<H>) -> Result<AnalysisResult> {
        let request = build_request(image);
        let body = serde_json::to_string(&request)
            .map_err(|e| Error::transport(format!("failed to encode request: {}", e)))?;
        let url = endpoint_url(&self.config.api_base, &self.config.model, &self.config.api_key);

        tracing::debug!(
            model = %self.config.model,
            mime_type = %image.mime_type,
            payload_len = image.data.len(),
            "Sending analysis request"
        );

        let result = match self.transport.post_json(&url, body).await {
            Ok(raw) => response_text(&raw).and_then(|text| parse_analysis_response(&text)),
            Err(e) => Err(e),
        };

        match &result {
            Ok(parsed) => tracing::debug!(bug_id = %parsed.analysis_a.bug_id, "Analysis completed"),
            Err(e) => tracing::warn!(error = %e, "Analysis failed"),
        }
        result
    }
}
