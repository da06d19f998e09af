//! Chart pane - grouped-average bar chart

use egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;

/// State for the Chart pane
pub struct ChartPaneState {
    pub show_values: bool,
}

impl Default for ChartPaneState {
    fn default() -> Self {
        Self { show_values: true }
    }
}

/// Render the chart pane
pub fn render(
    state: &mut ChartPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let figure = &shared.topics.chart;

    ui.horizontal(|ui| {
        ui.heading(&figure.title);
        if !figure.placeholder {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut state.show_values, "Values");
            });
        }
    });
    ui.separator();

    if figure.placeholder {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No chart to show").color(Color32::GRAY));
        });
        return Vec::new();
    }

    let bars: Vec<Bar> = figure
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64, bar.value)
                .name(format!("{} (n = {})", bar.category, bar.count))
                .width(0.6)
        })
        .collect();

    let categories: Vec<String> = figure.bars.iter().map(|b| b.category.clone()).collect();
    let chart = BarChart::new(&figure.y_label, bars).color(Color32::from_rgb(99, 110, 250));

    Plot::new("group_average_chart")
        .x_axis_label(&figure.x_label)
        .y_axis_label(&figure.y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if state.show_values {
                for (i, bar) in figure.bars.iter().enumerate() {
                    plot_ui.text(egui_plot::Text::new(
                        format!("value_{}", i),
                        egui_plot::PlotPoint::new(i as f64, bar.value),
                        RichText::new(format!("{:.2}", bar.value)).small(),
                    )
                    .anchor(egui::Align2::CENTER_BOTTOM));
                }
            }
        });

    Vec::new()
}

impl Pane for ChartPaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::Chart
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
