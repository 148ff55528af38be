//! LVM Bug Reader Common Library
//!
//! Web(WASM)とネイティブで共有される型とロジック:
//! 画像正規化、プロンプト・スキーマ、Gemini解析クライアント、
//! レスポンスパーサー、HTMLサニタイズ、画面の状態機械

pub mod types;
pub mod error;
pub mod image;
pub mod prompts;
pub mod schema;
pub mod gemini;
pub mod parser;
pub mod client;
pub mod markup;
pub mod layout;
pub mod session;

pub use types::{AnalysisResult, ExpertDiagnosis, ExtractedFields, BLANK, STRING_ID_PREFIX};
pub use error::{Error, ErrorKind, Result};
pub use image::{is_image_mime, ImageRecord};
pub use client::{build_request, AnalysisClient, ClientConfig, Transport};
pub use gemini::service_error;
pub use parser::parse_analysis_response;
pub use markup::sanitize;
pub use layout::embedded_json;
pub use session::{AnalysisTicket, AppState, ReadTicket, Session};
