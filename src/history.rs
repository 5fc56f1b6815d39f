//! Undo/redo ledger of reversible actions.
//!
//! Each entry carries an undo and a redo closure over some target `T`
//! (the canvas uses its item collection). The ledger is a list with a
//! cursor on the last applied entry: pushing after an undo drops the
//! entries past the cursor, and the list is capped at `max_size` with the
//! oldest entry evicted first.

use crate::constants::MAX_HISTORY_STATES;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::SystemTime;

/// What kind of operation an entry reverses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Reorder,
    Resize,
    Add,
    Remove,
    Batch,
}

type Apply<T> = Box<dyn Fn(&mut T)>;

/// One reversible unit of work
pub struct HistoryEntry<T> {
    kind: ActionKind,
    timestamp: SystemTime,
    undo: Apply<T>,
    redo: Apply<T>,
}

impl<T> HistoryEntry<T> {
    pub fn new(kind: ActionKind, undo: impl Fn(&mut T) + 'static, redo: impl Fn(&mut T) + 'static) -> Self {
        Self {
            kind,
            timestamp: SystemTime::now(),
            undo: Box::new(undo),
            redo: Box::new(redo),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn undo(&self, target: &mut T) {
        (self.undo)(target)
    }

    pub fn redo(&self, target: &mut T) {
        (self.redo)(target)
    }
}

impl<T> fmt::Debug for HistoryEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("kind", &self.kind)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// Bounded undo/redo history
pub struct History<T> {
    entries: VecDeque<HistoryEntry<T>>,
    /// Index of the last applied entry; `None` before the first one
    cursor: Option<usize>,
    max_size: usize,
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(MAX_HISTORY_STATES)
    }
}

impl<T> History<T> {
    /// A ledger holding at most `max_size` entries (at least one).
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_size: max_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        next < self.entries.len()
    }

    /// Kinds of all entries, oldest first
    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.entries.iter().map(HistoryEntry::kind)
    }

    /// Record an already applied action.
    pub fn push(&mut self, entry: HistoryEntry<T>) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);

        self.entries.push_back(entry);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        tracing::trace!(len = self.entries.len(), "History push");
    }

    /// Record several already applied actions as one undo step.
    ///
    /// Undo runs them newest first, redo oldest first. An empty batch is
    /// not recorded.
    pub fn batch(&mut self, actions: Vec<HistoryEntry<T>>)
    where
        T: 'static,
    {
        if actions.is_empty() {
            return;
        }
        let actions = std::rc::Rc::new(actions);
        let for_redo = std::rc::Rc::clone(&actions);
        self.push(HistoryEntry::new(
            ActionKind::Batch,
            move |target| {
                for action in actions.iter().rev() {
                    action.undo(target);
                }
            },
            move |target| {
                for action in for_redo.iter() {
                    action.redo(target);
                }
            },
        ));
    }

    /// Revert the entry under the cursor. Returns false at the start.
    pub fn undo(&mut self, target: &mut T) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        if let Some(entry) = self.entries.get(cursor) {
            entry.undo(target);
        }
        self.cursor = cursor.checked_sub(1);
        true
    }

    /// Reapply the entry after the cursor. Returns false at the end.
    pub fn redo(&mut self, target: &mut T) -> bool {
        if !self.can_redo() {
            return false;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        if let Some(entry) = self.entries.get(next) {
            entry.redo(target);
        }
        self.cursor = Some(next);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Change the cap, evicting the oldest entries if needed.
    ///
    /// When eviction is needed the redo tail goes first, so every remaining
    /// entry still matches the state it was recorded against.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        if self.entries.len() > self.max_size {
            self.entries.truncate(self.cursor.map_or(0, |c| c + 1));
        }
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
            self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
        }
    }
}
