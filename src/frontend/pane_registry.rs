//! Pane registry: data-driven pane registration.
//!
//! The registry is the single source of truth for all pane kinds: display
//! names and factory functions. The View menu is driven from this data.

use crate::frontend::pane_trait::Pane;
use crate::frontend::panes::{ArchivePaneState, ChartPaneState, ControlsPaneState, TablePaneState};
use crate::frontend::workspace::PaneKind;

/// Metadata for a pane kind, including its factory function.
pub struct PaneKindInfo {
    pub kind: PaneKind,
    pub display_name: &'static str,
    pub factory: fn() -> Box<dyn Pane>,
}

/// Registry entry for `kind`.
pub fn info(kind: PaneKind) -> PaneKindInfo {
    match kind {
        PaneKind::Controls => PaneKindInfo {
            kind,
            display_name: "Controls",
            factory: || Box::new(ControlsPaneState::default()),
        },
        PaneKind::DataTable => PaneKindInfo {
            kind,
            display_name: "Data Table",
            factory: || Box::new(TablePaneState::default()),
        },
        PaneKind::Chart => PaneKindInfo {
            kind,
            display_name: "Chart",
            factory: || Box::new(ChartPaneState::default()),
        },
        PaneKind::Archive => PaneKindInfo {
            kind,
            display_name: "Archived Files",
            factory: || Box::new(ArchivePaneState::default()),
        },
    }
}

/// Build the pane registry with all known pane kinds.
pub fn build_registry() -> Vec<PaneKindInfo> {
    PaneKind::ALL.into_iter().map(info).collect()
}
