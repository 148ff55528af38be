use thiserror::Error;

#[derive(Error, Debug)]
pub enum BugReaderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error(transparent)]
    Analysis(#[from] lvm_bug_reader_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl BugReaderError {
    /// APIキー未設定か
    pub fn is_missing_api_key(&self) -> bool {
        matches!(self, BugReaderError::Analysis(lvm_bug_reader_common::Error::MissingApiKey))
    }
}

pub type Result<T> = std::result::Result<T, BugReaderError>;
