//! Status bar panel: bottom bar showing the status message and dataset info.
//!
//! Sits below the dock workspace area.

use egui::{Color32, RichText, Ui};

use crate::frontend::topics::Topics;
use crate::types::StatusLevel;

/// Colour for a status level
pub fn level_color(level: StatusLevel) -> Color32 {
    match level {
        StatusLevel::Info => Color32::GRAY,
        StatusLevel::Success => Color32::from_rgb(100, 200, 100),
        StatusLevel::Warning => Color32::YELLOW,
        StatusLevel::Error => Color32::LIGHT_RED,
    }
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, topics: &Topics) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Host state dot ===
        let (dot_color, dot_hint) = if topics.host_running {
            (Color32::GREEN, "Host running")
        } else {
            (Color32::RED, "Host stopped")
        };
        ui.colored_label(dot_color, "●").on_hover_text(dot_hint);

        // === Status message ===
        ui.colored_label(
            level_color(topics.status.level),
            RichText::new(&topics.status.text).small(),
        );

        // === Dataset (right-aligned) ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(topics.table_shape()).small());
            ui.separator();
            let file = topics
                .current_filename
                .as_deref()
                .unwrap_or("default dataset");
            ui.label(RichText::new(file).small().monospace());
        });
    });
}
