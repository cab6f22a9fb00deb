use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// View shown when a session starts.
pub const DEFAULT_SIDEBAR_VIEW: &str = "cells";

/// Sidebar bookkeeping: the active view and the expanded-folder set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarState {
    view: String,
    expanded_folders: BTreeSet<String>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            view: DEFAULT_SIDEBAR_VIEW.to_string(),
            expanded_folders: BTreeSet::new(),
        }
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn set_view(&mut self, view: impl Into<String>) {
        self.view = view.into();
    }

    pub fn expand_folder(&mut self, path: impl Into<String>) {
        self.expanded_folders.insert(path.into());
    }

    pub fn collapse_folder(&mut self, path: &str) {
        self.expanded_folders.remove(path);
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded_folders.contains(path)
    }

    /// Expanded folder paths in stable (sorted) order.
    pub fn expanded_folders(&self) -> impl Iterator<Item = &str> {
        self.expanded_folders.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_cells_view_with_nothing_expanded() {
        let state = SidebarState::new();
        assert_eq!(state.view(), DEFAULT_SIDEBAR_VIEW);
        assert_eq!(state.expanded_folders().count(), 0);
    }

    #[test]
    fn expand_and_collapse_toggle_membership() {
        let mut state = SidebarState::new();
        state.expand_folder("/foo");
        assert!(state.is_expanded("/foo"));
        state.collapse_folder("/foo");
        assert!(!state.is_expanded("/foo"));
    }

    #[test]
    fn collapse_of_unknown_folder_is_a_noop() {
        let mut state = SidebarState::new();
        state.collapse_folder("/never-expanded");
        assert!(!state.is_expanded("/never-expanded"));
    }

    #[test]
    fn view_can_be_switched() {
        let mut state = SidebarState::new();
        state.set_view("search");
        assert_eq!(state.view(), "search");
    }

    #[test]
    fn expanded_set_round_trips_through_serde() {
        let mut state = SidebarState::new();
        state.expand_folder("/b");
        state.expand_folder("/a");

        let json = serde_json::to_string(&state).unwrap();
        let restored: SidebarState = serde_json::from_str(&json).unwrap();
        assert!(restored.is_expanded("/a"));
        assert!(restored.is_expanded("/b"));
        assert_eq!(restored.view(), DEFAULT_SIDEBAR_VIEW);
    }
}
