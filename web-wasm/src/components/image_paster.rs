//! スクリーンショット入力コンポーネント
//!
//! 貼り付け・ドラッグ&ドロップ・ファイル選択の3経路で画像を受け取る。
//! どの経路も最初の1枚だけを使う。

use gloo::file::callbacks::{read_as_bytes, FileReader};
use gloo::file::{File as GlooFile, ObjectUrl};
use leptos::prelude::*;
use lvm_bug_reader_common::{is_image_mime, Error, ImageRecord};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent, File, HtmlInputElement};

use crate::app::SessionSignal;
use crate::components::loading_spinner::LoadingSpinner;

/// 読み込み中のリーダー（dropすると読み込みが中断される）
type PendingRead = StoredValue<Option<FileReader>, LocalStorage>;

/// クリップボードから画像ファイルを探す
///
/// typeに "image" を含む最初の項目。画像がなければ最初のファイル項目を返して
/// 呼び出し側で拒否させる。テキストだけの貼り付けは None。
fn pasted_file(ev: &ClipboardEvent) -> Option<File> {
    let items = ev.clipboard_data()?.items();
    let mut other_file = None;

    for i in 0..items.length() {
        let Some(item) = items.get(i) else { continue };
        if item.kind() != "file" {
            continue;
        }
        if item.type_().contains("image") {
            if let Ok(Some(file)) = item.get_as_file() {
                return Some(file);
            }
        } else if other_file.is_none() {
            other_file = item.get_as_file().ok().flatten();
        }
    }
    other_file
}

/// ファイルを受け取ってセッションに読み込む
fn accept_file(file: File, session: SessionSignal, pending: PendingRead) {
    let mime_type = file.type_();
    if !is_image_mime(&mime_type) {
        session.update(|s| s.reject_input(Error::UnsupportedMediaType(mime_type)));
        return;
    }

    let ticket = match session.try_update(|s| s.begin_image_read()) {
        Some(Ok(ticket)) => ticket,
        Some(Err(e)) => {
            gloo::console::warn!("Image ignored:", e.to_string());
            return;
        }
        None => return,
    };

    let file = GlooFile::from(file);
    let display = ObjectUrl::from(file.clone());
    let reader = read_as_bytes(&file, move |bytes| {
        let record = bytes
            .map_err(|e| Error::ImageRead(e.to_string()))
            .and_then(|bytes| ImageRecord::from_bytes(&mime_type, &bytes, display));
        if let Err(e) = &record {
            gloo::console::error!("Error processing file:", e.to_string());
        }
        session.try_update(|s| s.finish_image_read(ticket, record));
    });

    // 前の読み込みはここで中断される
    pending.set_value(Some(reader));
}

#[component]
pub fn ImagePaster<A, R>(
    session: SessionSignal,
    /// APIキーが設定されているか
    analysis_enabled: bool,
    on_analyze: A,
    on_reset: R,
) -> impl IntoView
where
    A: Fn() + Copy + Send + Sync + 'static,
    R: Fn() + Copy + Send + Sync + 'static,
{
    let pending: PendingRead = StoredValue::new_local(None);
    let file_input = NodeRef::<leptos::html::Input>::new();
    let (is_dragover, set_is_dragover) = signal(false);

    let image_url = Memo::new(move |_| {
        session.with(|s| s.image().map(|image| (*image.display).to_owned()))
    });
    let is_analyzing = move || session.with(|s| s.is_analyzing());
    let analyze_disabled = move || !analysis_enabled || !session.with(|s| s.can_analyze());

    let on_clear = move |_| {
        pending.set_value(None);
        on_reset();
    };

    let on_paste = move |ev: web_sys::Event| {
        let ev: &ClipboardEvent = ev.unchecked_ref();
        if let Some(file) = pasted_file(ev) {
            ev.prevent_default();
            accept_file(file, session, pending);
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(false);

        let first = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = first {
            accept_file(file, session, pending);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(true);
    };

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            accept_file(file, session, pending);
        }
        // 同じファイルを選び直せるように
        input.set_value("");
    };

    let open_picker = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    view! {
        <div class="panel paster-panel">
            {move || match image_url.get() {
                Some(url) => view! {
                    <div class="preview">
                        <img src=url alt="Pasted Bug Report" class="preview-image" />
                        <div class="button-row">
                            <button class="btn btn-secondary" disabled=is_analyzing on:click=on_clear>
                                "Clear"
                            </button>
                            <button
                                class="btn btn-primary"
                                disabled=analyze_disabled
                                on:click=move |_| on_analyze()
                            >
                                <Show when=is_analyzing>
                                    <LoadingSpinner simple=true />
                                </Show>
                                {move || if is_analyzing() { "Analyzing..." } else { "Analyze Bug Report" }}
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div
                        class=move || if is_dragover.get() { "drop-zone dragover" } else { "drop-zone" }
                        tabindex="0"
                        on:paste=on_paste
                        on:drop=on_drop
                        on:dragover=on_dragover
                        on:dragleave=move |_| set_is_dragover.set(false)
                        on:click=open_picker
                    >
                        <input
                            type="file"
                            accept="image/*"
                            class="hidden"
                            node_ref=file_input
                            on:click=move |ev| ev.stop_propagation()
                            on:change=on_file_change
                        />
                        <div class="upload-icon">"📋"</div>
                        <p class="drop-title">"Paste screenshot here"</p>
                        <p class="text-muted">"or click to upload, or drag & drop"</p>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
