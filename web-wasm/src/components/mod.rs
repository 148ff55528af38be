//! UIコンポーネント

pub mod analysis_display;
pub mod error_banner;
pub mod header;
pub mod image_paster;
pub mod loading_spinner;
