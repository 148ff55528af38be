//! Gemini API連携（ブラウザfetch版）
//!
//! リクエスト組み立てとレスポンス解釈は共通ライブラリ側。
//! ここはfetchで送って本文を返すだけ。

use async_trait::async_trait;
use lvm_bug_reader_common::{service_error, AnalysisClient, ClientConfig, Error, Result, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に埋め込まれたAPIキー（GEMINI_API_KEY → API_KEY の順）
pub fn configured_api_key() -> Option<&'static str> {
    option_env!("GEMINI_API_KEY")
        .filter(|key| !key.trim().is_empty())
        .or(option_env!("API_KEY"))
}

/// 解析クライアントを作る（キーがなければ MissingApiKey）
pub fn build_client() -> Result<AnalysisClient<FetchTransport>> {
    let config = ClientConfig::from_optional(configured_api_key())?;
    Ok(AnalysisClient::new(config, FetchTransport))
}

/// window.fetch による Transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_error(context: &str, value: JsValue) -> Error {
    let detail = value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value));
    Error::transport(format!("{}: {}", context, detail))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| js_error("failed to build request", e))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| js_error("failed to set header", e))?;

        let window = web_sys::window().ok_or_else(|| Error::transport("no window available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch failed", e))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("unexpected fetch result", e))?;

        let text_promise = resp.text().map_err(|e| js_error("failed to read body", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_error("failed to read body", e))?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(service_error(resp.status(), &text));
        }
        Ok(text)
    }
}
