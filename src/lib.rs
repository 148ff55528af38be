//! LVM Bug Reader（ネイティブ）
//!
//! ブラウザ版と同じ解析クライアントを reqwest で動かす。
//! スクリプトからの一括確認やライブ統合テストで使う。

pub mod config;
pub mod error;
pub mod loader;
pub mod transport;

pub use lvm_bug_reader_common as common;

use std::path::Path;

use config::Config;
use error::Result;
use lvm_bug_reader_common::{AnalysisClient, AnalysisResult, Transport};
use transport::ReqwestTransport;

/// 設定からreqwest版クライアントを作る（APIキーがなければ失敗し、通信はしない）
pub fn client_from_config(config: &Config) -> Result<AnalysisClient<ReqwestTransport>> {
    let client_config = config.client_config()?;
    Ok(AnalysisClient::new(client_config, ReqwestTransport::new()))
}

/// スクリーンショット1枚を解析
///
/// ファイルが読めない・画像でない場合は送信せずに失敗する
pub async fn analyze_image_file<T: Transport>(
    client: &AnalysisClient<T>,
    path: &Path,
) -> Result<AnalysisResult> {
    let image = loader::load_image_file(path)?;
    Ok(client.analyze(&image).await?)
}
