//! Archived Files pane - clickable list of saved uploads

use egui::{Color32, RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;

/// State for the Archived Files pane
#[derive(Default)]
pub struct ArchivePaneState {
    /// Case-insensitive filter on the original file name
    pub filter: String,
}

/// Render the archive pane
pub fn render(
    state: &mut ArchivePaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Archived Files");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
                actions.push(AppAction::RefreshFiles);
            }
        });
    });
    ui.add(egui::TextEdit::singleline(&mut state.filter).hint_text("Filter..."));
    ui.separator();

    let files = &shared.topics.file_list;
    if files.is_empty() {
        ui.colored_label(Color32::GRAY, "No uploads yet");
        return actions;
    }

    let needle = state.filter.to_lowercase();
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // Indices are render positions in the unfiltered list, which is
            // what the host resolves clicks against.
            for (index, file) in files.iter().enumerate() {
                if !needle.is_empty() && !file.original_name.to_lowercase().contains(&needle) {
                    continue;
                }
                let is_current =
                    shared.topics.current_filename.as_deref() == Some(file.generated_name.as_str());
                let response = ui
                    .selectable_label(is_current, &file.original_name)
                    .on_hover_text(&file.generated_name);
                if let Some(created) = file.created_at {
                    ui.label(
                        RichText::new(created.format("%Y-%m-%d %H:%M:%S").to_string())
                            .small()
                            .color(Color32::GRAY),
                    );
                }
                if response.clicked() {
                    actions.push(AppAction::OpenArchived(index));
                }
            }
        });

    actions
}

impl Pane for ArchivePaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::Archive
    }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
