//! 画像正規化モジュール
//!
//! 貼り付け・ドロップ・ファイル選択で受け取った画像を
//! Base64 + MIMEタイプ + 表示用ハンドルの [`ImageRecord`] にまとめる。

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// 正規化済み画像
///
/// `H` は表示用ハンドル。ブラウザではObject URL（dropで解放）、
/// ネイティブやテストでは `()` や `String` を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord<H = ()> {
    /// Base64エンコード済みの画像データ（パディングあり標準アルファベット）
    pub data: String,
    pub mime_type: String,
    pub display: H,
}

/// 宣言されたContent-Typeが画像か
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

impl<H> ImageRecord<H> {
    /// 生バイトから作成（Content-Typeが image/ で始まらない場合はエラー）
    pub fn from_bytes(mime_type: &str, bytes: &[u8], display: H) -> Result<Self> {
        if !is_image_mime(mime_type) {
            return Err(Error::UnsupportedMediaType(mime_type.to_string()));
        }
        Ok(Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.trim().to_string(),
            display,
        })
    }

    /// Base64データを元のバイト列に戻す
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::ImageRead(e.to_string()))
    }

    /// 表示ハンドルを外した送信用コピー
    pub fn detached(&self) -> ImageRecord {
        ImageRecord {
            data: self.data.clone(),
            mime_type: self.mime_type.clone(),
            display: (),
        }
    }
}
