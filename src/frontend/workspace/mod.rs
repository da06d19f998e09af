//! Workspace module for dockable pane management
//!
//! Provides the core workspace types: PaneId, PaneKind, Workspace.
//! Uses egui_dock for drag-and-drop docking, tabs, and splits.

pub mod default_layout;
pub mod tab_viewer;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::frontend::pane_registry;
use crate::frontend::pane_trait::Pane;

/// Unique identifier for a pane instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

impl PaneId {
    pub fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

/// Kind of pane. Every kind is a singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneKind {
    Controls,
    DataTable,
    Chart,
    Archive,
}

impl PaneKind {
    pub const ALL: [PaneKind; 4] = [
        PaneKind::Controls,
        PaneKind::DataTable,
        PaneKind::Chart,
        PaneKind::Archive,
    ];
}

/// Metadata entry for a pane
pub struct PaneEntry {
    pub id: PaneId,
    pub kind: PaneKind,
    pub title: String,
}

/// The workspace holds all dock state and pane data.
pub struct Workspace {
    pub dock_state: egui_dock::DockState<PaneId>,
    pub pane_states: HashMap<PaneId, Box<dyn Pane>>,
    pub pane_entries: HashMap<PaneId, PaneEntry>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dock_state: egui_dock::DockState::new(vec![]),
            pane_states: HashMap::new(),
            pane_entries: HashMap::new(),
        }
    }

    /// Register a new pane and return its ID.
    pub fn register_pane(&mut self, kind: PaneKind) -> PaneId {
        let id = PaneId::next();
        let info = pane_registry::info(kind);

        self.pane_states.insert(id, (info.factory)());
        self.pane_entries.insert(
            id,
            PaneEntry {
                id,
                kind,
                title: info.display_name.to_string(),
            },
        );

        id
    }

    /// Find the pane of the given kind, if open.
    pub fn find_pane(&self, kind: PaneKind) -> Option<PaneId> {
        self.pane_entries
            .values()
            .find(|e| e.kind == kind)
            .map(|e| e.id)
    }

    /// Focus the pane of `kind`, creating it in a new tab if closed.
    pub fn open_pane(&mut self, kind: PaneKind) {
        if let Some(id) = self.find_pane(kind) {
            if let Some(tab) = self.dock_state.find_tab(&id) {
                self.dock_state.set_active_tab(tab);
                return;
            }
            // Entry without a tab: stale, drop and recreate.
            self.remove_pane(id);
        }
        let id = self.register_pane(kind);
        self.dock_state.push_to_first_leaf(id);
    }

    /// Remove a pane by ID.
    pub fn remove_pane(&mut self, id: PaneId) {
        self.pane_states.remove(&id);
        self.pane_entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let mut workspace = Workspace::new();
        let id = workspace.register_pane(PaneKind::Chart);
        assert_eq!(workspace.find_pane(PaneKind::Chart), Some(id));
        assert_eq!(workspace.pane_entries[&id].title, "Chart");
        assert_eq!(workspace.pane_states[&id].kind(), PaneKind::Chart);
        assert_eq!(workspace.find_pane(PaneKind::Archive), None);
    }

    #[test]
    fn test_open_pane_is_singleton() {
        let mut workspace = Workspace::new();
        workspace.open_pane(PaneKind::Archive);
        workspace.open_pane(PaneKind::Archive);
        assert_eq!(workspace.pane_entries.len(), 1);
    }

    #[test]
    fn test_remove_pane() {
        let mut workspace = Workspace::new();
        let id = workspace.register_pane(PaneKind::Controls);
        workspace.remove_pane(id);
        assert!(workspace.pane_states.is_empty());
        assert!(workspace.find_pane(PaneKind::Controls).is_none());
    }
}
