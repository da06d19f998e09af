//! Data Table pane - paged view of the active dataset

use egui::{Color32, RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;
use crate::types::Scalar;

/// State for the Data Table pane
#[derive(Default)]
pub struct TablePaneState {
    /// Zero-based page index
    pub page: usize,
    /// Table generation the page index belongs to
    seen_generation: u64,
}

/// Number of pages needed for `rows` at `page_size` (at least one)
pub fn page_count(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    rows.div_ceil(page_size).max(1)
}

/// Render the data table pane
pub fn render(
    state: &mut TablePaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let table = &shared.topics.table;

    // New dataset: back to the first page
    if state.seen_generation != shared.topics.table_generation {
        state.seen_generation = shared.topics.table_generation;
        state.page = 0;
    }

    if table.num_columns() == 0 {
        ui.colored_label(Color32::GRAY, "No dataset loaded");
        return Vec::new();
    }

    let page_size = shared.config.table.page_size.max(1);
    let pages = page_count(table.num_rows(), page_size);
    state.page = state.page.min(pages - 1);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.page > 0, egui::Button::new("◀"))
            .clicked()
        {
            state.page -= 1;
        }
        ui.label(format!("Page {} of {}", state.page + 1, pages));
        if ui
            .add_enabled(state.page + 1 < pages, egui::Button::new("▶"))
            .clicked()
        {
            state.page += 1;
        }
        ui.separator();
        ui.label(RichText::new(table.shape_label()).small().color(Color32::GRAY));
    });
    ui.separator();

    let start = state.page * page_size;
    let end = (start + page_size).min(table.num_rows());

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("data_table_grid")
                .num_columns(table.num_columns())
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for column in table.columns() {
                        ui.strong(&column.name);
                    }
                    ui.end_row();

                    for row in start..end {
                        let Some(cells) = table.row(row) else {
                            break;
                        };
                        for cell in cells {
                            match cell {
                                Scalar::Number(_) => {
                                    ui.label(RichText::new(cell.to_string()).monospace());
                                }
                                Scalar::Text(text) => {
                                    ui.label(text);
                                }
                                Scalar::Missing => {
                                    ui.colored_label(Color32::GRAY, "—");
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });

    Vec::new()
}

impl Pane for TablePaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::DataTable
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 12), 1);
        assert_eq!(page_count(12, 12), 1);
        assert_eq!(page_count(13, 12), 2);
        assert_eq!(page_count(1704, 12), 142);
        assert_eq!(page_count(5, 0), 1);
    }
}
