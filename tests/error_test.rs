//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use lvm_bug_reader::config::Config;
use lvm_bug_reader::error::BugReaderError;
use lvm_bug_reader::loader::load_image_file;
use lvm_bug_reader_common::{Error, ErrorKind};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let result = load_image_file(Path::new("/nonexistent/path/12345.png"));
    assert!(matches!(result, Err(BugReaderError::FileNotFound(_))));
}

/// 画像以外のファイル（ドロップしたテキストファイル相当）
#[test]
fn test_load_text_file_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let result = load_image_file(&path);
    assert!(matches!(result, Err(BugReaderError::UnsupportedImage(_))));
}

/// BugReaderErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        BugReaderError::Config("テスト設定エラー".to_string()),
        BugReaderError::FileNotFound("shot.png".to_string()),
        BugReaderError::UnsupportedImage("notes.txt".to_string()),
        BugReaderError::Analysis(Error::MissingApiKey),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// APIキー未設定は解析前に失敗する
#[test]
fn test_missing_api_key_is_fatal_before_any_call() {
    let config = Config::default();
    let err = config.client_config_with(|_| None).unwrap_err();

    assert!(err.is_missing_api_key());
    assert_eq!(format!("{}", err), "API_KEY environment variable not set");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: BugReaderError = io_err.into();

    assert!(matches!(err, BugReaderError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: BugReaderError = json_err.into();

    assert!(matches!(err, BugReaderError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = Error::InvalidResponse("not json".to_string());
    let err: BugReaderError = common_err.into();

    match &err {
        BugReaderError::Analysis(inner) => assert_eq!(inner.kind(), ErrorKind::InvalidResponse),
        other => panic!("Expected Analysis error, got {:?}", other),
    }
    assert_eq!(format!("{}", err), "Invalid AI response: not json");
}
