//! Unit tests for the settings file.

use gridboard::settings::{CanvasSettings, WheelMode};
use gridboard::CanvasError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = CanvasSettings::default();
    settings.grid.cols = 3;
    settings.drag_threshold = 8.0;
    settings.wheel_mode = WheelMode::Pan;
    settings.save_to(&path).unwrap();

    assert_eq!(CanvasSettings::load_from(&path).unwrap(), settings);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(CanvasSettings::load_from(&path), Err(CanvasError::Io(_))));
    assert_eq!(CanvasSettings::load_or_default(&path), CanvasSettings::default());
}

#[test]
fn test_malformed_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(CanvasSettings::load_from(&path), Err(CanvasError::Json(_))));
    assert_eq!(CanvasSettings::load_or_default(&path), CanvasSettings::default());
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"history_limit": 0}"#).unwrap();
    assert!(CanvasSettings::load_from(&path).is_err());
    assert_eq!(CanvasSettings::load_or_default(&path), CanvasSettings::default());

    fs::write(&path, r#"{"min_resize_width": -5.0}"#).unwrap();
    assert!(CanvasSettings::load_from(&path).is_err());

    fs::write(&path, r#"{"drag_threshold": -1.0}"#).unwrap();
    assert!(CanvasSettings::load_from(&path).is_err());
}

#[test]
fn test_empty_object_is_all_defaults() {
    let settings: CanvasSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, CanvasSettings::default());
    assert!(settings.validate().is_ok());
}
