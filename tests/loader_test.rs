//! 画像ファイル正規化テスト

use lvm_bug_reader::loader::load_image_file;
use tempfile::tempdir;

const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D', b'R',
];

#[test]
fn test_png_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("LVM-31313.png");
    std::fs::write(&path, PNG_BYTES).unwrap();

    let record = load_image_file(&path).unwrap();
    assert_eq!(record.mime_type, "image/png");
    assert_eq!(record.decode().unwrap(), PNG_BYTES);
    assert_eq!(record.display, path);
}

#[test]
fn test_uppercase_jpeg_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("SCREENSHOT.JPEG");
    std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0]).unwrap();

    let record = load_image_file(&path).unwrap();
    assert_eq!(record.mime_type, "image/jpeg");
    assert_eq!(record.data, "/9j/4A==");
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(load_image_file(dir.path()).is_err());
}
