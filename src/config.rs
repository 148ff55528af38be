use crate::error::{BugReaderError, Result};
use lvm_bug_reader_common::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use lvm_bug_reader_common::{ClientConfig, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを読む環境変数（先頭優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base: GEMINI_API_BASE.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), model = %config.model, "Loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BugReaderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lvm-bug-reader").join("config.json"))
    }

    /// APIキーを取得
    pub fn api_key(&self) -> Result<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// 環境変数の読み方を差し替えられる版（テスト用）
    pub fn api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        // 環境変数を優先
        for name in API_KEY_ENV_VARS {
            if let Some(key) = lookup(name).filter(|k| !k.trim().is_empty()) {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(BugReaderError::Analysis(Error::MissingApiKey))
    }

    /// 解析クライアント用の設定に変換（APIキーがなければここで失敗）
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.client_config_with(|name| std::env::var(name).ok())
    }

    pub fn client_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let config = ClientConfig::new(self.api_key_with(lookup)?)?
            .with_model(self.model.clone())
            .with_api_base(self.api_base.clone());
        Ok(config)
    }
}
