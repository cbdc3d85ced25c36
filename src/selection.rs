use crate::lister::Entry;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    Single,
    Multi,
}

/// Files the user has marked, keyed by full path so that a re-filtered or
/// re-sorted list can never point a mark at the wrong row.
///
/// Directories never occupy the selection: they are navigated, not picked.
#[derive(Debug, Clone)]
pub struct Selection {
    mode: SelectionMode,
    selected: IndexSet<PathBuf>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: IndexSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Applies a plain click according to the mode.
    pub fn select(&mut self, entry: &Entry) {
        match self.mode {
            SelectionMode::Single => self.set_only(entry),
            SelectionMode::Multi => {
                self.toggle(entry);
            }
        }
    }

    /// Flips membership of a file and returns whether it is now selected.
    /// Directories are ignored.
    pub fn toggle(&mut self, entry: &Entry) -> bool {
        if entry.is_dir {
            return false;
        }
        if self.selected.shift_remove(&entry.path) {
            false
        } else {
            self.selected.insert(entry.path.clone());
            true
        }
    }

    /// Replaces the selection with `entry`. A directory leaves it empty.
    pub fn set_only(&mut self, entry: &Entry) {
        self.selected.clear();
        if !entry.is_dir {
            self.selected.insert(entry.path.clone());
        }
    }

    /// Adds a file without toggling it off when already present.
    pub fn insert(&mut self, entry: &Entry) {
        if entry.is_dir {
            return;
        }
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(entry.path.clone());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.selected.contains(&entry.path)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Resolves the marks against the visible `entries` of `directory`.
    /// Marks no longer visible and directories are dropped; output follows
    /// list order.
    ///
    /// The raw file name is joined, not the display `name`, which is lossy
    /// for names that are not valid UTF-8.
    pub fn selected_paths(&self, directory: &Path, entries: &[Entry]) -> Vec<PathBuf> {
        entries
            .iter()
            .filter(|e| !e.is_dir && self.contains(e))
            .map(|e| match e.path.file_name() {
                Some(raw) => directory.join(raw),
                None => e.path.clone(),
            })
            .collect()
    }
}
