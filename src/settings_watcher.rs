//! Settings file watcher for hot reload.
//!
//! Watches the directory holding the settings file (so the file may be
//! created or replaced atomically by an editor) and reports changes to that
//! one file over a channel. The host polls `SettingsWatcher::poll` from its
//! own loop; nothing here touches the canvas.

use crate::error::CanvasResult;
use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use tracing::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A change to the watched settings file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    _watcher: PollWatcher,
    rx: Receiver<SettingsEvent>,
    path: PathBuf,
}

impl SettingsWatcher {
    /// Start watching `path`. Its parent directory is created if missing.
    pub fn new(path: impl Into<PathBuf>) -> CanvasResult<Self> {
        Self::with_poll_interval(path, POLL_INTERVAL)
    }

    pub fn with_poll_interval(path: impl Into<PathBuf>, interval: Duration) -> CanvasResult<Self> {
        let path = path.into();
        let watch_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&watch_dir)?;

        let file_name = path.file_name().map(OsString::from);
        let (tx, rx) = channel();

        let config = notify::Config::default().with_poll_interval(interval);
        let mut watcher = PollWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let event = match res {
                    Ok(event) => classify(&event, file_name.as_deref()),
                    Err(e) => {
                        error!(error = %e, "Settings watch error");
                        Some(SettingsEvent::Error(e.to_string()))
                    }
                };
                if let Some(event) = event {
                    let _ = tx.send(event);
                }
            },
            config,
        )?;
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next pending change, without blocking.
    pub fn poll(&self) -> Option<SettingsEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next change.
    pub fn wait(&self, timeout: Duration) -> Option<SettingsEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

fn classify(event: &Event, file_name: Option<&std::ffi::OsStr>) -> Option<SettingsEvent> {
    let touches_file = event
        .paths
        .iter()
        .any(|p| file_name.is_some() && p.file_name() == file_name);
    if !touches_file {
        return None;
    }
    match event.kind {
        EventKind::Create(_) => Some(SettingsEvent::Created),
        EventKind::Modify(_) => Some(SettingsEvent::Modified),
        EventKind::Remove(_) => Some(SettingsEvent::Deleted),
        _ => None,
    }
}
