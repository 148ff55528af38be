//! AIレスポンスパーサー
//!
//! モデルが返したテキストを [`AnalysisResult`] に変換する。
//! 前後の空白以外は手を加えない（```json フェンスや前置きの文章は不正扱い）。

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// 必須のトップレベルグループ
pub const REQUIRED_GROUPS: &[&str] = &["analysisA", "analysisB"];

/// 解析レスポンスをパース
///
/// # Arguments
/// * `response` - モデル出力テキスト（JSONドキュメント1つ）
///
/// # Returns
/// * `Ok(AnalysisResult)` - パース成功（欠落フィールドは "blank" で補完済み）
/// * `Err(Error::InvalidResponse)` - JSONでない、グループ欠落、型不一致
///
/// # Examples
/// ```
/// use lvm_bug_reader_common::parse_analysis_response;
///
/// let response = r#"{"analysisA": {"bugId": "LVM-31313"}, "analysisB": {"globalChecking": "No"}}"#;
/// let result = parse_analysis_response(response).unwrap();
/// assert_eq!(result.analysis_a.bug_id, "LVM-31313");
/// assert_eq!(result.analysis_a.priority, "blank");
/// ```
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(response.trim())
        .map_err(|e| Error::InvalidResponse(format!("response is not valid JSON: {}", e)))?;

    let Some(map) = value.as_object() else {
        return Err(Error::InvalidResponse("response is not a JSON object".into()));
    };

    for group in REQUIRED_GROUPS {
        match map.get(*group) {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(Error::InvalidResponse(format!("{} is not an object", group)));
            }
            None => {
                return Err(Error::InvalidResponse(format!("missing required field {}", group)));
            }
        }
    }

    serde_json::from_value(value)
        .map_err(|e| Error::InvalidResponse(format!("schema violation: {}", e)))
}
