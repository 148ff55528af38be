//! メインアプリケーションコンポーネント

use std::rc::Rc;

use gloo::file::ObjectUrl;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lvm_bug_reader_common::{AnalysisClient, Error, Session};

use crate::api::gemini::{build_client, FetchTransport};
use crate::components::{
    analysis_display::AnalysisDisplay,
    error_banner::{ErrorBanner, FatalBanner},
    header::Header,
    image_paster::ImagePaster,
    loading_spinner::AnalyzingPanel,
};

/// ブラウザ版のセッション（表示ハンドルはobject URL）
pub type BrowserSession = Session<ObjectUrl>;

/// セッションを持つシグナル（ObjectUrlがSendでないのでローカル）
pub type SessionSignal = RwSignal<BrowserSession, LocalStorage>;

type ClientSlot = StoredValue<std::result::Result<Rc<AnalysisClient<FetchTransport>>, Error>, LocalStorage>;

/// 解析を開始し、結果をセッションに戻す
///
/// 解析中の二重起動は `begin_analysis` が None を返すので何もしない。
fn start_analysis(session: SessionSignal, client: ClientSlot) {
    let Some(client) = client.with_value(|c| c.as_ref().ok().cloned()) else {
        return;
    };
    let Some((ticket, image)) = session.try_update(|s| s.begin_analysis()).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = client.analyze(&image).await;
        if let Err(e) = &result {
            gloo::console::error!("Analysis failed:", e.to_string());
        }
        session.try_update(|s| s.complete_analysis(ticket, result));
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(Session::new());

    // APIキーは起動時に1回だけ読む
    let client: ClientSlot = StoredValue::new_local(build_client().map(Rc::new));
    let config_error = client.with_value(|c| c.as_ref().err().map(|e| e.user_message()));
    if let Some(message) = &config_error {
        gloo::console::error!("Configuration error:", message.clone());
    }
    let analysis_enabled = config_error.is_none();

    let on_analyze = move || start_analysis(session, client);
    let on_reset = move || session.update(|s| s.reset());

    view! {
        <div class="container">
            <Header />

            <main>
                {config_error.map(|message| view! { <FatalBanner message=message /> })}

                <Show when=move || session.with(|s| s.result().is_none())>
                    <ImagePaster
                        session=session
                        analysis_enabled=analysis_enabled
                        on_analyze=on_analyze
                        on_reset=on_reset
                    />
                </Show>

                <Show when=move || session.with(|s| s.is_analyzing())>
                    <AnalyzingPanel />
                </Show>

                {move || {
                    session
                        .with(|s| s.error_message().map(str::to_owned))
                        .map(|message| view! {
                            <ErrorBanner
                                message=message
                                on_dismiss=move || session.update(|s| s.dismiss_error())
                            />
                        })
                }}

                {move || {
                    session
                        .with(|s| s.result().cloned())
                        .map(|result| view! { <AnalysisDisplay result=result on_reset=on_reset /> })
                }}
            </main>
        </div>
    }
}
