//! Frontend module for egui UI
//!
//! This module provides the dashboard UI using eframe/egui. It sends user
//! interactions to the host thread through crossbeam channels and renders
//! the slot values the host publishes back.
//!
//! # Architecture
//!
//! The frontend uses an egui_dock workspace where every UI element is a pane:
//! controls, data table, chart and archived files. Panes can be rearranged
//! via drag-and-drop docking.
//!
//! # Main Types
//!
//! - [`DashboardApp`] - Main application state implementing [`eframe::App`]
//! - [`Workspace`](workspace::Workspace) - Dock state and pane management
//! - [`Topics`] - Mirror of the host's slot values

pub mod pane_registry;
pub mod pane_trait;
pub mod panes;
pub mod state;
pub mod status_bar;
pub mod topics;
pub mod workspace;

pub use state::{AppAction, SharedState};
pub use topics::Topics;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::TrySendError;
use workspace::tab_viewer::WorkspaceTabViewer;
use workspace::Workspace;

use crate::binding::UiEvent;
use crate::config::{DashboardConfig, UiSessionState};
use crate::data::csv_codec::write_csv;
use crate::error::{DashError, Result};
use crate::host::HostBridge;
use crate::types::{StatusMessage, Upload};

/// Main application state for the dashboard
pub struct DashboardApp {
    // === Communication ===
    bridge: HostBridge,

    // === Shared State ===
    config: DashboardConfig,
    session: UiSessionState,

    // === Slot mirror ===
    topics: Topics,

    // === Workspace ===
    workspace: Workspace,
}

impl DashboardApp {
    /// Create a new application instance
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        bridge: HostBridge,
        config: DashboardConfig,
        session: UiSessionState,
    ) -> Self {
        cc.egui_ctx.set_visuals(if config.ui.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let mut topics = Topics::new(config.chart.default_column.clone());

        // Restore the last column if it is still on offer
        if let Some(column) = session
            .selected_column
            .as_ref()
            .filter(|c| **c != config.chart.default_column && config.chart.columns.contains(c))
        {
            topics.selected_column = column.clone();
            if let Err(e) = bridge.send_event(UiEvent::ColumnSelected(column.clone())) {
                tracing::warn!("Could not restore column {}: {}", column, e);
            }
        }

        let mut workspace = Workspace::new();
        let dock_state = workspace::default_layout::build_default_layout(&mut workspace);
        workspace.dock_state = dock_state;

        Self {
            bridge,
            config,
            session,
            topics,
            workspace,
        }
    }

    fn process_host_messages(&mut self) -> bool {
        let messages = self.bridge.drain();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.topics.apply_message(msg);
        }
        had_messages
    }

    fn send_event(&mut self, event: UiEvent) {
        match self.bridge.send_event(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Host queue full, event dropped");
                self.topics.status = StatusMessage::warning("Dashboard is busy, try again");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Host is not running, event dropped");
                self.topics.status =
                    StatusMessage::error("Dashboard host stopped, restart the app");
            }
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::SelectColumn(column) => {
                self.send_event(UiEvent::ColumnSelected(column));
            }
            AppAction::PickUpload => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Upload CSV")
                    .add_filter("CSV", &["csv"])
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.upload_path(&path);
                }
            }
            AppAction::Upload(upload) => {
                self.send_event(UiEvent::Upload(upload));
            }
            AppAction::OpenArchived(index) => {
                self.send_event(UiEvent::FileClicked(index));
            }
            AppAction::RefreshFiles => {
                self.send_event(UiEvent::RefreshFiles);
            }
            AppAction::ResetDataset => {
                self.send_event(UiEvent::ResetDataset);
            }
            AppAction::ExportCsv => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Export CSV")
                    .add_filter("CSV", &["csv"])
                    .set_file_name(self.export_file_name())
                    .save_file()
                {
                    match export_table(&self.topics, &path) {
                        Ok(()) => {
                            self.topics.status =
                                StatusMessage::success(format!("Exported to {}", path.display()));
                        }
                        Err(e) => {
                            tracing::warn!("Export failed: {}", e);
                            self.topics.status = StatusMessage::error(e.to_string());
                        }
                    }
                }
            }
            AppAction::OpenPane(kind) => {
                self.workspace.open_pane(kind);
            }
            AppAction::ClosePane(id) => {
                self.workspace.remove_pane(id);
            }
        }
    }

    /// Read a file from disk and send it as an upload.
    fn upload_path(&mut self, path: &Path) {
        match read_upload(path) {
            Ok(upload) => self.send_event(UiEvent::Upload(upload)),
            Err(e) => {
                tracing::warn!("Could not read {:?}: {}", path, e);
                self.topics.status = StatusMessage::error(e.to_string());
            }
        }
    }

    fn export_file_name(&self) -> String {
        match &self.topics.current_filename {
            Some(name) => name.clone(),
            None => "dataset.csv".to_string(),
        }
    }

    /// Files dropped onto the window become uploads.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = file.bytes {
                let name = if file.name.is_empty() {
                    "upload.csv".to_string()
                } else {
                    file.name.clone()
                };
                self.handle_action(AppAction::Upload(Upload::new(name, bytes)));
            } else if let Some(path) = file.path {
                self.upload_path(&path);
            }
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        let mut upload = false;
        let mut refresh = false;

        ctx.input(|i| {
            if i.key_pressed(Key::O) && i.modifiers.command_only() {
                upload = true;
            }
            if i.key_pressed(Key::R) && i.modifiers.command_only() {
                refresh = true;
            }
        });

        if upload {
            self.handle_action(AppAction::PickUpload);
        }
        if refresh {
            self.handle_action(AppAction::RefreshFiles);
        }
    }
}

/// Build an upload from a file on disk.
pub fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = std::fs::read(path)
        .map_err(|e| DashError::StorageIo(format!("Could not read {}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();
    Ok(Upload::new(name, Arc::<[u8]>::from(bytes)))
}

/// Write the mirrored table to `path` as CSV.
pub fn export_table(topics: &Topics, path: &Path) -> Result<()> {
    let bytes = write_csv(&topics.table)?;
    std::fs::write(path, bytes)
        .map_err(|e| DashError::StorageIo(format!("Could not write {}: {}", path.display(), e)))
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_host_messages();
        self.handle_dropped_files(ctx);
        self.handle_keyboard_shortcuts(ctx);

        if had_messages {
            ctx.request_repaint();
        } else {
            // Host replies arrive asynchronously
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // Remember the window size for the next launch
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.session.window.size = (rect.width() as u32, rect.height() as u32);
        }
        if let Some(maximized) = ctx.input(|i| i.viewport().maximized) {
            self.session.window.maximized = maximized;
        }

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload CSV...").clicked() {
                        self.handle_action(AppAction::PickUpload);
                        ui.close();
                    }
                    if ui.button("Export CSV...").clicked() {
                        self.handle_action(AppAction::ExportCsv);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });

                ui.menu_button("Data", |ui| {
                    if ui.button("Reset to default dataset").clicked() {
                        self.handle_action(AppAction::ResetDataset);
                        ui.close();
                    }
                    if ui.button("Refresh archived files").clicked() {
                        self.handle_action(AppAction::RefreshFiles);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    for info in pane_registry::build_registry() {
                        if ui.button(info.display_name).clicked() {
                            self.handle_action(AppAction::OpenPane(info.kind));
                            ui.close();
                        }
                    }
                    ui.separator();
                    ui.checkbox(&mut self.session.show_status_bar, "Status bar");
                });
            });
        });

        if self.session.show_status_bar {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                status_bar::render_status_bar(ui, &self.topics);
            });
        }

        // Dock workspace
        {
            let mut viewer = WorkspaceTabViewer {
                bridge: &self.bridge,
                config: &self.config,
                session: &mut self.session,
                topics: &mut self.topics,
                pane_states: &mut self.workspace.pane_states,
                pane_entries: &self.workspace.pane_entries,
                actions: Vec::new(),
            };

            egui_dock::DockArea::new(&mut self.workspace.dock_state)
                .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut viewer);

            let actions = viewer.actions;
            for action in actions {
                self.handle_action(action);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.bridge.shutdown();

        self.session.selected_column = Some(self.topics.selected_column.clone());
        if let Err(e) = self.session.save() {
            tracing::warn!("Failed to save UI session: {}", e);
        }
    }
}

/// Initial window size from the saved session
pub fn initial_window_size(session: &UiSessionState) -> [f32; 2] {
    let (w, h) = session.window.size;
    [w.max(640) as f32, h.max(480) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{SlotId, SlotValue};
    use crate::data::csv_codec::parse_csv;

    #[test]
    fn test_read_upload_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("gapminder small.csv");
        std::fs::write(&path, b"a,b\n1,2\n").unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.original_name, "gapminder small.csv");
        assert_eq!(&upload.bytes[..], b"a,b\n1,2\n");
    }

    #[test]
    fn test_read_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_upload(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashError::StorageIo(_)));
    }

    #[test]
    fn test_export_table_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut topics = Topics::default();
        let table = Arc::new(parse_csv(b"region,value\nA,1\nB,2\n").unwrap());
        topics.apply(SlotId::TableData, SlotValue::Table(table.clone()));

        export_table(&topics, &path).unwrap();
        let written = parse_csv(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, *table);
    }

    #[test]
    fn test_initial_window_size_has_floor() {
        let mut session = UiSessionState::default();
        session.window.size = (100, 100);
        assert_eq!(initial_window_size(&session), [640.0, 480.0]);
    }
}
