//! レスポンススキーマ定義
//!
//! Gemini の `responseSchema` に渡す固定スキーマ。
//! 型名は Gemini API の Type 列挙（OBJECT / STRING / ARRAY）に合わせる。

use serde_json::{json, Map, Value};

/// Analysis A のフィールド（スキーマ上の順序）
pub const ANALYSIS_A_FIELDS: &[&str] = &[
    "bugId",
    "vendorTask",
    "parentID",
    "priority",
    "xtmProject",
    "language",
    "stringIds",
    "sourceString",
    "currentTranslation",
    "finalTranslation",
    "issueDescription",
];

/// Analysis B のフィールド（スキーマ上の順序）
pub const ANALYSIS_B_FIELDS: &[&str] = &[
    "impactAssessment",
    "globalChecking",
    "rootCauseInference",
    "enhancedTranslationDiff",
    "uniqueProjectName",
    "involvedProjects",
    "actionableRecommendations",
];

fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list_field(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

fn object(fields: &[&str], properties: Map<String, Value>) -> Value {
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": fields,
    })
}

fn analysis_a_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("bugId".into(), string_field("JIRA issue identifier (e.g., LVM-31313)."));
    properties.insert("vendorTask".into(), string_field("The 'RING_XXXX_PXXXX' value from the bug title."));
    properties.insert("parentID".into(), string_field("The 'LOC-XXXX' value from the bug title."));
    properties.insert("priority".into(), string_field("The JIRA issue priority."));
    properties.insert("xtmProject".into(), string_field("The value for 'XTM Project Number'."));
    properties.insert("language".into(), string_field("The value from the 'Language' field."));
    properties.insert(
        "stringIds".into(),
        string_list_field("List of all identifiers starting with 'RingCentral.'."),
    );
    properties.insert(
        "sourceString".into(),
        string_field("The full value after the 'Source String' label, including any content on subsequent lines."),
    );
    properties.insert(
        "currentTranslation".into(),
        string_field("The full value after the 'Current Translation' label, including any content on subsequent lines."),
    );
    properties.insert(
        "finalTranslation".into(),
        string_field("The full value after the 'Final Translation' label, including any content on subsequent lines."),
    );
    properties.insert(
        "issueDescription".into(),
        string_field("The value after the 'Description' label in the yellow box, including any content on subsequent lines."),
    );
    object(ANALYSIS_A_FIELDS, properties)
}

fn analysis_b_schema() -> Value {
    let mut properties = Map::new();
    properties.insert(
        "impactAssessment".into(),
        string_field("HTML string evaluating the bug's impact with keywords tagged."),
    );
    properties.insert(
        "globalChecking".into(),
        string_field("A one-word judgment ('Yes' or 'No') on whether global checking for similar issues is needed."),
    );
    properties.insert(
        "rootCauseInference".into(),
        string_field("HTML string inferring the problem's source with keywords tagged."),
    );
    properties.insert(
        "enhancedTranslationDiff".into(),
        string_field("HTML string showing word-level diff between translations."),
    );
    properties.insert("uniqueProjectName".into(), string_field("Project name from the first 'String ID'."));
    properties.insert("involvedProjects".into(), string_field("Project name from the first 'String ID'."));
    properties.insert(
        "actionableRecommendations".into(),
        string_list_field("Array of HTML strings with concrete steps to fix the issue."),
    );
    object(ANALYSIS_B_FIELDS, properties)
}

/// 解析結果の固定スキーマ
pub fn analysis_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("analysisA".into(), analysis_a_schema());
    properties.insert("analysisB".into(), analysis_b_schema());
    object(&["analysisA", "analysisB"], properties)
}
