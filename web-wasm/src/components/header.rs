//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🔎 L10n LVM Bug Reader"</h1>
            <p class="subtitle">"AI-Powered Localization Bug Analysis"</p>
            <p class="text-muted">"Upload / Paste a JIRA bug report screenshot for expert analysis"</p>
        </header>
    }
}
