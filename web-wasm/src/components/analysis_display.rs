//! 解析結果表示コンポーネント
//!
//! 左: 抽出データ / 右: 診断。AI生成のHTMLはサニタイズしてから描画する。
//! 末尾に結果全体のJSONを `<script type="application/json">` で埋め込む。

use leptos::prelude::*;
use lvm_bug_reader_common::layout::{
    string_ids_text, Field, DETAIL_FIELDS, EMBEDDED_JSON_ID, STRING_FIELDS,
};
use lvm_bug_reader_common::{embedded_json, sanitize, AnalysisResult, STRING_ID_PREFIX};

#[component]
fn Card(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card">
            <h2 class="card-title">{title}</h2>
            {children()}
        </div>
    }
}

#[component]
fn DetailItem(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="detail-item">
            <dt>{label}</dt>
            <dd>{children()}</dd>
        </div>
    }
}

/// サニタイズ済みHTMLの段落
#[component]
fn RichText(html: String, #[prop(optional)] class: &'static str) -> impl IntoView {
    view! { <div class=format!("rich-text {}", class) inner_html=sanitize(&html) /> }
}

#[component]
pub fn AnalysisDisplay<R>(result: AnalysisResult, on_reset: R) -> impl IntoView
where
    R: Fn() + 'static,
{
    let json = embedded_json(&result);
    let string_ids = string_ids_text(&result);
    let foreign_ids = result.analysis_a.string_ids_with_foreign_prefix().join(", ");

    let details = DETAIL_FIELDS
        .iter()
        .map(|field| {
            let value = field.value(&result).to_owned();
            view! { <DetailItem label=field.label()>{value}</DetailItem> }
        })
        .collect_view();

    let strings = STRING_FIELDS
        .iter()
        .map(|field| {
            let value = field.value(&result).to_owned();
            view! {
                <DetailItem label=field.label()>
                    <p class="string-value">{value}</p>
                </DetailItem>
            }
        })
        .collect_view();

    let issue_description = Field::IssueDescription.value(&result).to_owned();
    let impact = Field::ImpactAssessment.value(&result).to_owned();
    let root_cause = Field::RootCauseInference.value(&result).to_owned();
    let diff = Field::EnhancedTranslationDiff.value(&result).to_owned();

    let global_checking = result.analysis_b.global_checking.clone();
    let global_class = if result.analysis_b.needs_global_check() {
        "global-yes"
    } else {
        "global-no"
    };

    let recommendations = result
        .analysis_b
        .actionable_recommendations
        .iter()
        .map(|rec| view! { <li inner_html=sanitize(rec) /> })
        .collect_view();

    view! {
        <div class="analysis">
            <div class="reset-row">
                <button class="btn btn-primary" on:click=move |_| on_reset()>
                    "Analyze Another Report"
                </button>
            </div>

            <div class="columns">
                <div class="details-column">
                    <Card title="Bug Report Details">
                        <dl>{details}</dl>
                    </Card>
                    <Card title="String IDs">
                        <pre class="string-ids">{string_ids}</pre>
                        {(!foreign_ids.is_empty()).then(|| view! {
                            <p class="badge badge-warning">
                                {format!("Unexpected prefix (expected {}): {}", STRING_ID_PREFIX, foreign_ids)}
                            </p>
                        })}
                    </Card>
                    <Card title="Strings">
                        <dl>{strings}</dl>
                    </Card>
                    <Card title="Issue Description">
                        <p>{issue_description}</p>
                    </Card>
                </div>

                <div class="insights-column">
                    <Card title="Expert Diagnosis">
                        <h3>{Field::ImpactAssessment.label()}</h3>
                        <RichText html=impact />

                        <div class="global-checking">
                            <span class="global-label">"Global checking: "</span>
                            <span class=global_class>{global_checking}</span>
                        </div>

                        <h3>{Field::RootCauseInference.label()}</h3>
                        <RichText html=root_cause />

                        <h3>{Field::EnhancedTranslationDiff.label()}</h3>
                        <RichText html=diff class="diff-box" />
                    </Card>
                    <Card title="Actionable Recommendations">
                        <ol class="recommendations">{recommendations}</ol>
                    </Card>
                </div>
            </div>

            <script type="application/json" id=EMBEDDED_JSON_ID inner_html=json></script>
        </div>
    }
}
