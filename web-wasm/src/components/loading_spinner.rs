//! ローディング表示コンポーネント

use leptos::prelude::*;

/// スピナー（`simple` はボタン内に置く小さい版）
#[component]
pub fn LoadingSpinner(#[prop(optional)] simple: bool) -> impl IntoView {
    let class = if simple { "spinner spinner-small" } else { "spinner" };
    view! { <div class=class /> }
}

/// 解析中パネル
#[component]
pub fn AnalyzingPanel() -> impl IntoView {
    view! {
        <div class="panel loading-panel">
            <LoadingSpinner />
            <p class="loading-text">"Analyzing bug report... this may take a moment."</p>
        </div>
    }
}
