//! 画像ファイルの読み込み
//!
//! ブラウザのFile.typeに相当するContent-Typeを拡張子から決め、
//! 共通の正規化ルール（image/ のみ受け付け）で ImageRecord を作る。

use crate::error::{BugReaderError, Result};
use lvm_bug_reader_common::ImageRecord;
use std::path::{Path, PathBuf};

const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
];

/// 拡張子からMIMEタイプを推定（大文字小文字は区別しない）
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// 画像ファイルを読み込んで ImageRecord を作る（表示ハンドルはファイルパス）
pub fn load_image_file(path: &Path) -> Result<ImageRecord<PathBuf>> {
    if !path.is_file() {
        return Err(BugReaderError::FileNotFound(path.display().to_string()));
    }

    let mime_type = mime_type_for_path(path)
        .ok_or_else(|| BugReaderError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let record = ImageRecord::from_bytes(mime_type, &bytes, path.to_path_buf())?;
    tracing::debug!(path = %path.display(), mime_type, size = bytes.len(), "Loaded image file");
    Ok(record)
}
