//! Shared state types for the frontend
//!
//! Panes receive `SharedState` via borrowing and return `AppAction`s instead
//! of talking to the host directly.

use crate::config::{DashboardConfig, UiSessionState};
use crate::frontend::topics::Topics;
use crate::host::HostBridge;
use crate::types::Upload;

use super::workspace::{PaneId, PaneKind};

/// Shared state accessible by all panes (borrowed, not owned).
///
/// Slot values mirrored from the host are read through `topics`.
pub struct SharedState<'a> {
    pub bridge: &'a HostBridge,
    pub config: &'a DashboardConfig,
    pub session: &'a mut UiSessionState,
    pub topics: &'a mut Topics,
}

impl SharedState<'_> {
    /// Whether the active dataset has `column`
    pub fn dataset_has_column(&self, column: &str) -> bool {
        self.topics.table.has_column(column)
    }
}

/// Actions that any pane can emit
#[derive(Debug, Clone)]
pub enum AppAction {
    // Dashboard events
    /// Choose the aggregation column
    SelectColumn(String),
    /// Show the file picker and upload the chosen CSV
    PickUpload,
    /// Upload bytes that are already in memory
    Upload(Upload),
    /// Load an archive entry by render index
    OpenArchived(usize),
    RefreshFiles,
    ResetDataset,

    // Local actions
    /// Save the active table as CSV
    ExportCsv,

    // Workspace actions
    /// Open/focus a pane, or create if not exists
    OpenPane(PaneKind),
    /// Close a pane (remove from dock and clean up state)
    ClosePane(PaneId),
}
