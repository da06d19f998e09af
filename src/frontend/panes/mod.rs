//! Pane modules for the workspace
//!
//! Each pane provides a render function that takes its own state, SharedState, and &mut Ui.
//! Panes return Vec<AppAction> instead of mutating state directly.

pub mod archive;
pub mod chart;
pub mod controls;
pub mod data_table;

pub use archive::ArchivePaneState;
pub use chart::ChartPaneState;
pub use controls::ControlsPaneState;
pub use data_table::TablePaneState;
