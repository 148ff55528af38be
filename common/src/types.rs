//! 解析結果の型定義
//!
//! ネイティブとWeb(WASM)で共有される型:
//! - ExtractedFields: Analysis A（スクリーンショットから抜き出した値）
//! - ExpertDiagnosis: Analysis B（AIによる診断コメント）
//! - AnalysisResult: 上記2つをまとめた最終出力
//!
//! JSONのフィールド名は画面に埋め込むJSONブロックの契約でもあるので変更しないこと。

use serde::{Deserialize, Deserializer, Serialize};

/// 値が読み取れない場合の番兵値
pub const BLANK: &str = "blank";

/// String IDの名前空間プレフィックス
pub const STRING_ID_PREFIX: &str = "RingCentral.";

fn blank() -> String {
    BLANK.to_string()
}

/// null・欠落・空文字を "blank" に寄せる
fn string_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => blank(),
    })
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Analysis A: 構造化データ抽出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    #[serde(deserialize_with = "string_or_blank")]
    pub bug_id: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub vendor_task: String,      // RING_XXXX_PXXXX

    #[serde(rename = "parentID", deserialize_with = "string_or_blank")]
    pub parent_id: String,        // LOC-XXXX

    #[serde(deserialize_with = "string_or_blank")]
    pub priority: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub xtm_project: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub language: String,

    #[serde(deserialize_with = "list_or_empty")]
    pub string_ids: Vec<String>,

    #[serde(deserialize_with = "string_or_blank")]
    pub source_string: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub current_translation: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub final_translation: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub issue_description: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            bug_id: blank(),
            vendor_task: blank(),
            parent_id: blank(),
            priority: blank(),
            xtm_project: blank(),
            language: blank(),
            string_ids: Vec::new(),
            source_string: blank(),
            current_translation: blank(),
            final_translation: blank(),
            issue_description: blank(),
        }
    }
}

impl ExtractedFields {
    /// プレフィックスが "RingCentral." でないString ID
    pub fn string_ids_with_foreign_prefix(&self) -> Vec<&str> {
        self.string_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.starts_with(STRING_ID_PREFIX))
            .collect()
    }
}

/// Analysis B: エキスパート診断
///
/// `impact_assessment` などのリッチテキストはAI由来の信頼できないHTML。
/// 表示前に必ず [`crate::markup::sanitize`] を通すこと。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertDiagnosis {
    #[serde(deserialize_with = "string_or_blank")]
    pub impact_assessment: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub global_checking: String,  // "Yes" / "No"

    #[serde(deserialize_with = "string_or_blank")]
    pub root_cause_inference: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub enhanced_translation_diff: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub unique_project_name: String,

    #[serde(deserialize_with = "string_or_blank")]
    pub involved_projects: String, // uniqueProjectNameと同じ値

    #[serde(deserialize_with = "list_or_empty")]
    pub actionable_recommendations: Vec<String>,
}

impl Default for ExpertDiagnosis {
    fn default() -> Self {
        Self {
            impact_assessment: blank(),
            global_checking: blank(),
            root_cause_inference: blank(),
            enhanced_translation_diff: blank(),
            unique_project_name: blank(),
            involved_projects: blank(),
            actionable_recommendations: Vec::new(),
        }
    }
}

impl ExpertDiagnosis {
    /// 類似問題の横断チェックが必要か
    pub fn needs_global_check(&self) -> bool {
        self.global_checking.trim().eq_ignore_ascii_case("yes")
    }
}

/// AI解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis_a: ExtractedFields,
    pub analysis_b: ExpertDiagnosis,
}

/// String IDからプロジェクト名を取り出す
///
/// 最初のドットの次のセグメント。`"RingCentral.app.title"` → `"app"`
pub fn project_name_from_string_id(string_id: &str) -> String {
    string_id
        .split('.')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(blank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_fields_default_is_blank() {
        let fields = ExtractedFields::default();
        assert_eq!(fields.bug_id, BLANK);
        assert_eq!(fields.issue_description, BLANK);
        assert!(fields.string_ids.is_empty());
    }

    #[test]
    fn test_analysis_result_serialize_field_names() {
        let result = AnalysisResult {
            analysis_a: ExtractedFields {
                bug_id: "LVM-31313".to_string(),
                parent_id: "LOC-1234".to_string(),
                xtm_project: "88120".to_string(),
                ..Default::default()
            },
            analysis_b: ExpertDiagnosis {
                global_checking: "No".to_string(),
                ..Default::default()
            },
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"analysisA\":"));
        assert!(json.contains("\"analysisB\":"));
        assert!(json.contains("\"bugId\":\"LVM-31313\""));
        assert!(json.contains("\"parentID\":\"LOC-1234\""));
        assert!(json.contains("\"xtmProject\":\"88120\""));
        assert!(json.contains("\"globalChecking\":\"No\""));
        assert!(json.contains("\"actionableRecommendations\":[]"));
    }

    #[test]
    fn test_deserialize_missing_fields_become_blank() {
        let json = r#"{
            "analysisA": {"bugId": "LVM-1", "stringIds": ["RingCentral.app.title"]},
            "analysisB": {"globalChecking": "Yes"}
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.analysis_a.bug_id, "LVM-1");
        assert_eq!(result.analysis_a.vendor_task, BLANK);
        assert_eq!(result.analysis_a.parent_id, BLANK);
        assert_eq!(result.analysis_a.string_ids, vec!["RingCentral.app.title"]);
        assert_eq!(result.analysis_b.impact_assessment, BLANK);
        assert!(result.analysis_b.actionable_recommendations.is_empty());
    }

    #[test]
    fn test_deserialize_null_and_empty_become_blank() {
        let json = r#"{
            "analysisA": {"bugId": null, "priority": "", "language": "   ", "stringIds": null},
            "analysisB": {"uniqueProjectName": null, "actionableRecommendations": null}
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.analysis_a.bug_id, BLANK);
        assert_eq!(result.analysis_a.priority, BLANK);
        assert_eq!(result.analysis_a.language, BLANK);
        assert!(result.analysis_a.string_ids.is_empty());
        assert_eq!(result.analysis_b.unique_project_name, BLANK);
        assert!(result.analysis_b.actionable_recommendations.is_empty());
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        let json = r#"{"analysisA": {"bugId": 31313}, "analysisB": {}}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());

        let json = r#"{"analysisA": {"stringIds": "RingCentral.a"}, "analysisB": {}}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_deserialize_missing_group_fails() {
        let json = r#"{"analysisA": {"bugId": "LVM-1"}}"#;
        let err = serde_json::from_str::<AnalysisResult>(json).unwrap_err();
        assert!(err.to_string().contains("analysisB"));
    }

    #[test]
    fn test_multiline_strings_preserved() {
        let json = r#"{
            "analysisA": {"sourceString": "Line one\nLine two"},
            "analysisB": {}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.analysis_a.source_string, "Line one\nLine two");
    }

    // =============================================
    // 派生値テスト
    // =============================================

    #[test]
    fn test_needs_global_check() {
        let mut diagnosis = ExpertDiagnosis::default();
        assert!(!diagnosis.needs_global_check());

        diagnosis.global_checking = "Yes".to_string();
        assert!(diagnosis.needs_global_check());

        diagnosis.global_checking = " yes ".to_string();
        assert!(diagnosis.needs_global_check());

        diagnosis.global_checking = "No".to_string();
        assert!(!diagnosis.needs_global_check());
    }

    #[test]
    fn test_project_name_from_string_id() {
        assert_eq!(project_name_from_string_id("RingCentral.app.title"), "app");
        assert_eq!(project_name_from_string_id("RingCentral.contactCenter"), "contactCenter");
        assert_eq!(project_name_from_string_id("RingCentral"), BLANK);
        assert_eq!(project_name_from_string_id("RingCentral."), BLANK);
        assert_eq!(project_name_from_string_id(""), BLANK);
    }

    #[test]
    fn test_string_ids_with_foreign_prefix() {
        let fields = ExtractedFields {
            string_ids: vec![
                "RingCentral.app.title".to_string(),
                "Glip.menu.open".to_string(),
                "RingCentral.ui.ok".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(fields.string_ids_with_foreign_prefix(), vec!["Glip.menu.open"]);
    }
}
