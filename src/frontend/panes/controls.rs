//! Controls pane - column selection, upload and dataset actions

use egui::{Color32, RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;

/// State for the Controls pane
#[derive(Default)]
pub struct ControlsPaneState;

/// Render the controls pane
pub fn render(
    _state: &mut ControlsPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.heading("Aggregate");
    ui.label(
        RichText::new(format!("Average by {}", shared.config.chart.group_column))
            .small()
            .color(Color32::GRAY),
    );
    ui.add_space(4.0);

    for column in &shared.config.chart.columns {
        let selected = shared.topics.selected_column == *column;
        let available = shared.dataset_has_column(column);
        let text = if available {
            RichText::new(column)
        } else {
            RichText::new(column).color(Color32::GRAY)
        };
        let response = ui
            .radio(selected, text)
            .on_hover_text(if available {
                "Average this column per group"
            } else {
                "Not in the current dataset"
            });
        if response.clicked() && !selected {
            // Mirror locally so the radio does not flicker until the host answers.
            shared.topics.selected_column = column.clone();
            shared.session.selected_column = Some(column.clone());
            actions.push(AppAction::SelectColumn(column.clone()));
        }
    }

    ui.separator();
    ui.heading("Dataset");

    let source = match &shared.topics.current_filename {
        Some(name) => name.as_str(),
        None => "default dataset",
    };
    ui.label(RichText::new(source).monospace());
    ui.label(
        RichText::new(shared.topics.table_shape())
            .small()
            .color(Color32::GRAY),
    );
    ui.add_space(6.0);

    if ui
        .button("Upload CSV...")
        .on_hover_text("Or drop a .csv file onto the window")
        .clicked()
    {
        actions.push(AppAction::PickUpload);
    }
    if ui.button("Reset to default").clicked() {
        actions.push(AppAction::ResetDataset);
    }
    let has_rows = shared.topics.table.num_rows() > 0;
    if ui
        .add_enabled(has_rows, egui::Button::new("Export CSV..."))
        .clicked()
    {
        actions.push(AppAction::ExportCsv);
    }

    actions
}

impl Pane for ControlsPaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::Controls
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
