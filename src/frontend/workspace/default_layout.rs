//! Default workspace layout

use egui_dock::{DockState, NodeIndex};

use super::{PaneId, PaneKind, Workspace};

/// Build the default dock layout and return the DockState.
///
/// Layout:
/// ```text
/// ┌──────────────┬────────────────────────────────┐
/// │  Controls    │            Chart               │
/// │              │                                │
/// │──────────────├────────────────────────────────┤
/// │  Archived    │          Data Table            │
/// │  Files       │                                │
/// └──────────────┴────────────────────────────────┘
/// ```
pub fn build_default_layout(workspace: &mut Workspace) -> DockState<PaneId> {
    let controls_id = workspace.register_pane(PaneKind::Controls);
    let archive_id = workspace.register_pane(PaneKind::Archive);
    let chart_id = workspace.register_pane(PaneKind::Chart);
    let table_id = workspace.register_pane(PaneKind::DataTable);

    let mut dock = DockState::new(vec![chart_id]);

    let [center, left] = dock
        .main_surface_mut()
        .split_left(NodeIndex::root(), 0.24, vec![controls_id]);

    dock.main_surface_mut()
        .split_below(left, 0.45, vec![archive_id]);

    dock.main_surface_mut()
        .split_below(center, 0.5, vec![table_id]);

    dock
}
