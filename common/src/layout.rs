//! 結果表示のレイアウト定義
//!
//! 2カラム表示（左: 抽出データ / 右: 診断）の項目とラベル、
//! および画面に埋め込む機械可読JSONブロックの生成。

use crate::types::AnalysisResult;

/// 埋め込みJSONブロックの要素ID
pub const EMBEDDED_JSON_ID: &str = "bug-report-data";

/// 表示項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BugId,
    ParentId,
    VendorTask,
    Priority,
    XtmProject,
    Language,
    UniqueProjectName,
    InvolvedProjects,
    SourceString,
    CurrentTranslation,
    FinalTranslation,
    IssueDescription,
    ImpactAssessment,
    RootCauseInference,
    EnhancedTranslationDiff,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::BugId => "Bug ID",
            Field::ParentId => "Parent ID",
            Field::VendorTask => "Vendor Task",
            Field::Priority => "Priority",
            Field::XtmProject => "XTM Project",
            Field::Language => "Language",
            Field::UniqueProjectName => "Unique Project Name",
            Field::InvolvedProjects => "Involved Projects",
            Field::SourceString => "Source String",
            Field::CurrentTranslation => "Current Translation",
            Field::FinalTranslation => "Final Translation",
            Field::IssueDescription => "Issue Description",
            Field::ImpactAssessment => "Impact Assessment",
            Field::RootCauseInference => "Root Cause Inference",
            Field::EnhancedTranslationDiff => "Enhanced Translation Diff",
        }
    }

    pub fn value(self, result: &AnalysisResult) -> &str {
        let a = &result.analysis_a;
        let b = &result.analysis_b;
        match self {
            Field::BugId => &a.bug_id,
            Field::ParentId => &a.parent_id,
            Field::VendorTask => &a.vendor_task,
            Field::Priority => &a.priority,
            Field::XtmProject => &a.xtm_project,
            Field::Language => &a.language,
            Field::UniqueProjectName => &b.unique_project_name,
            Field::InvolvedProjects => &b.involved_projects,
            Field::SourceString => &a.source_string,
            Field::CurrentTranslation => &a.current_translation,
            Field::FinalTranslation => &a.final_translation,
            Field::IssueDescription => &a.issue_description,
            Field::ImpactAssessment => &b.impact_assessment,
            Field::RootCauseInference => &b.root_cause_inference,
            Field::EnhancedTranslationDiff => &b.enhanced_translation_diff,
        }
    }

    /// AI生成のHTMLを含む項目か（表示前にサニタイズが必要）
    pub fn is_rich_text(self) -> bool {
        matches!(
            self,
            Field::ImpactAssessment | Field::RootCauseInference | Field::EnhancedTranslationDiff
        )
    }
}

/// 左カラム「Bug Report Details」
pub const DETAIL_FIELDS: &[Field] = &[
    Field::BugId,
    Field::ParentId,
    Field::VendorTask,
    Field::Priority,
    Field::XtmProject,
    Field::Language,
    Field::UniqueProjectName,
    Field::InvolvedProjects,
];

/// 左カラム「Strings」
pub const STRING_FIELDS: &[Field] = &[
    Field::SourceString,
    Field::CurrentTranslation,
    Field::FinalTranslation,
];

/// String IDを改行区切りで連結
pub fn string_ids_text(result: &AnalysisResult) -> String {
    result.analysis_a.string_ids.join("\n")
}

/// `<script type="application/json">` に埋め込むJSON
///
/// 2スペースインデント。`<` は `\u003c` にしてscript要素を閉じられないようにする
/// （JSONとしては同じ値に戻る）。
pub fn embedded_json(result: &AnalysisResult) -> String {
    serde_json::to_string_pretty(result)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
}
