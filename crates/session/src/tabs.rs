use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier minted for each opened tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub fn new() -> Self {
        Self(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A cell currently open as a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCell {
    pub path: String,
    pub tab_id: TabId,
}

/// Tracks the ordered set of open cells and the selected one.
///
/// Open order is preserved (oldest first), so the last entry is the most
/// recently opened cell; that is the fallback selection when the selected
/// cell closes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabRegistry {
    open_cells: Vec<OpenCell>,
    selected: Option<String>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the cell at `path` (a second open of the same path reuses its
    /// tab) and selects it. Returns the tab id either way.
    pub fn open_cell(&mut self, path: impl Into<String>) -> TabId {
        let path = path.into();
        let tab_id = match self.open_cells.iter().find(|cell| cell.path == path) {
            Some(cell) => cell.tab_id,
            None => {
                let tab_id = TabId::new();
                self.open_cells.push(OpenCell {
                    path: path.clone(),
                    tab_id,
                });
                tab_id
            }
        };
        self.selected = Some(path);
        tab_id
    }

    /// Closes the cell at `path`. Closing the selected cell falls back to the
    /// most recently opened remaining cell, or clears the selection when no
    /// cells stay open. Closing an unknown path is a no-op.
    pub fn close_cell(&mut self, path: &str) {
        self.open_cells.retain(|cell| cell.path != path);
        if self.selected.as_deref() == Some(path) {
            self.selected = self.open_cells.last().map(|cell| cell.path.clone());
        }
    }

    /// Marks the cell at `path` as selected without changing the open set.
    pub fn select_cell(&mut self, path: impl Into<String>) {
        self.selected = Some(path.into());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn open_cells(&self) -> &[OpenCell] {
        &self.open_cells
    }

    pub fn is_open(&self, path: &str) -> bool {
        self.open_cells.iter().any(|cell| cell.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.open_cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open_cells.len()
    }
}
