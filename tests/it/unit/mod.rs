//! Unit tests for gridboard.

mod layout_tests;
mod pointer_tests;
mod settings_tests;
mod settings_watcher_tests;
mod snapshot_tests;
