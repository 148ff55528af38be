//! エラー型定義
//!
//! 解析フローのエラーは4系統に分かれる:
//! - 設定エラー（APIキー未設定など、起動時に致命的）
//! - 入力エラー（画像以外のファイル、読み込み失敗）
//! - サービスエラー（通信・認証・レート制限・サーバーエラー）
//! - レスポンス不正（JSONでない、必須グループ欠落）

use thiserror::Error;

/// ユーザーに表示する汎用サービスエラーメッセージ
pub const SERVICE_FAILURE_MESSAGE: &str =
    "An error occurred while analyzing the bug report with Gemini.";

/// AI出力が不正な場合のメッセージ
pub const INVALID_RESPONSE_MESSAGE: &str =
    "Failed to get a valid analysis from the AI. The response was not valid JSON.";

/// 画像読み込み失敗時のメッセージ
pub const IMAGE_READ_MESSAGE: &str = "Could not process the image file.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Image read error: {0}")]
    ImageRead(String),

    #[error("Gemini API error{}: {message}", status_suffix(.status))]
    Service { status: Option<u16>, message: String },

    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),

    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// エラー分類（UI表示・テストでの判別用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
    Service,
    InvalidResponse,
    State,
}

impl Error {
    /// 通信失敗（ステータスなし）を作る
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Service { status: None, message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingApiKey | Error::Config(_) => ErrorKind::Configuration,
            Error::UnsupportedMediaType(_) | Error::ImageRead(_) => ErrorKind::Input,
            Error::Service { .. } => ErrorKind::Service,
            Error::InvalidResponse(_) => ErrorKind::InvalidResponse,
            Error::InvalidTransition(_) => ErrorKind::State,
        }
    }

    /// 画面に出すメッセージ
    ///
    /// サービスエラーとレスポンス不正は詳細を隠して固定文言にする。
    /// 詳細は `Display` 側に残るのでログに出すこと。
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Service => SERVICE_FAILURE_MESSAGE.to_string(),
            ErrorKind::InvalidResponse => INVALID_RESPONSE_MESSAGE.to_string(),
            _ => match self {
                Error::ImageRead(_) => IMAGE_READ_MESSAGE.to_string(),
                Error::UnsupportedMediaType(mime) => {
                    format!("Please provide an image file (received \"{mime}\").")
                }
                other => other.to_string(),
            },
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_api_key() {
        let error = Error::MissingApiKey;
        assert_eq!(error.to_string(), "API_KEY environment variable not set");
        assert_eq!(error.user_message(), "API_KEY environment variable not set");
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_display_service_with_status() {
        let error = Error::Service { status: Some(429), message: "quota exceeded".into() };
        let display = error.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("quota exceeded"));
    }

    #[test]
    fn test_error_display_service_without_status() {
        let error = Error::transport("connection reset");
        assert_eq!(error.to_string(), "Gemini API error: connection reset");
    }

    #[test]
    fn test_user_message_hides_service_details() {
        let error = Error::Service { status: Some(500), message: "backend exploded".into() };
        assert_eq!(error.user_message(), SERVICE_FAILURE_MESSAGE);
        assert!(!error.user_message().contains("backend"));
    }

    #[test]
    fn test_user_message_distinguishes_invalid_response() {
        let service = Error::transport("x").user_message();
        let invalid = Error::InvalidResponse("expected value".into()).user_message();
        assert_ne!(service, invalid);
        assert_eq!(invalid, INVALID_RESPONSE_MESSAGE);
    }

    #[test]
    fn test_input_errors() {
        let error = Error::UnsupportedMediaType("text/plain".into());
        assert_eq!(error.kind(), ErrorKind::Input);
        assert!(error.user_message().contains("text/plain"));

        let error = Error::ImageRead("NotReadableError".into());
        assert_eq!(error.user_message(), IMAGE_READ_MESSAGE);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
