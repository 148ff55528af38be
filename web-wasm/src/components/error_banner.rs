//! エラーバナーコンポーネント

use leptos::prelude::*;

/// 閉じるボタン付きのエラー表示
#[component]
pub fn ErrorBanner<F>(message: String, on_dismiss: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <div class="alert alert-error" role="alert">
            <strong>"Error: "</strong>
            <span class="alert-message">{message}</span>
            <button class="alert-close" aria-label="Close" on:click=move |_| on_dismiss()>
                "×"
            </button>
        </div>
    }
}

/// 起動時の設定エラー（閉じられない）
#[component]
pub fn FatalBanner(message: String) -> impl IntoView {
    view! {
        <div class="alert alert-error alert-fatal" role="alert">
            <strong>"Error: "</strong>
            <span class="alert-message">{message}</span>
        </div>
    }
}
