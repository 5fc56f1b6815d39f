//! Unit tests for the settings file watcher.

use gridboard::settings::CanvasSettings;
use gridboard::settings_watcher::{SettingsEvent, SettingsWatcher};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const INTERVAL: Duration = Duration::from_millis(50);

/// Wait until the watcher reports an event matching `want`.
fn wait_for(watcher: &SettingsWatcher, want: impl Fn(&SettingsEvent) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(event) = watcher.wait(Duration::from_millis(100)) {
            if want(&event) {
                return true;
            }
        }
    }
    false
}

#[test]
fn test_watcher_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("settings.json");
    let watcher = SettingsWatcher::with_poll_interval(&path, INTERVAL).unwrap();
    assert!(path.parent().unwrap().is_dir());
    assert_eq!(watcher.path(), path.as_path());
    assert_eq!(watcher.poll(), None);
}

#[test]
fn test_watcher_reports_new_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let watcher = SettingsWatcher::with_poll_interval(&path, INTERVAL).unwrap();

    CanvasSettings::default().save_to(&path).unwrap();
    assert!(wait_for(&watcher, |e| matches!(
        e,
        SettingsEvent::Created | SettingsEvent::Modified
    )));
}

#[test]
fn test_watcher_reports_deletion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    CanvasSettings::default().save_to(&path).unwrap();
    let watcher = SettingsWatcher::with_poll_interval(&path, INTERVAL).unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(wait_for(&watcher, |e| *e == SettingsEvent::Deleted));
}

#[test]
fn test_watcher_ignores_neighbours() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let watcher = SettingsWatcher::with_poll_interval(&path, INTERVAL).unwrap();

    std::fs::write(dir.path().join("other.json"), "{}").unwrap();
    std::thread::sleep(INTERVAL * 6);
    assert_eq!(watcher.poll(), None);
}
