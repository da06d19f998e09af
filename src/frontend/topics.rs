//! Slot values published by the host and consumed by panes.
//!
//! `Topics` mirrors every derived slot plus the selected column. The app
//! writes to it from `process_host_messages()`; panes read it via
//! `shared.topics`.

use std::sync::Arc;

use crate::binding::{DispatchReport, SlotId, SlotValue};
use crate::data::aggregate::ChartFigure;
use crate::host::HostMessage;
use crate::types::{ArchivedFile, Dataset, StatusMessage};

/// All slot data mirrored from the host.
pub struct Topics {
    pub selected_column: String,
    pub table: Arc<Dataset>,
    /// Incremented whenever `table` is replaced
    pub table_generation: u64,
    pub chart: ChartFigure,
    pub status: StatusMessage,
    pub current_filename: Option<String>,
    pub file_list: Vec<ArchivedFile>,

    /// Last dispatch report, for diagnostics
    pub last_report: Option<(&'static str, DispatchReport)>,
    /// False once the host has shut down
    pub host_running: bool,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            selected_column: String::new(),
            table: Arc::new(Dataset::empty()),
            table_generation: 0,
            chart: ChartFigure::placeholder("Loading..."),
            status: StatusMessage::info("Starting..."),
            current_filename: None,
            file_list: Vec::new(),
            last_report: None,
            host_running: true,
        }
    }
}

impl Topics {
    pub fn new(selected_column: impl Into<String>) -> Self {
        Self {
            selected_column: selected_column.into(),
            ..Self::default()
        }
    }

    /// Apply one host message
    pub fn apply_message(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::SlotUpdate(values) => {
                for (slot, value) in values {
                    self.apply(slot, value);
                }
            }
            HostMessage::Report { event, report } => {
                for failure in &report.failures {
                    tracing::debug!("{} failed during {}: {}", failure.edge, event, failure.message);
                }
                self.last_report = Some((event, report));
            }
            HostMessage::Shutdown => {
                tracing::info!("Host shutdown received");
                self.host_running = false;
            }
        }
    }

    /// Mirror one slot value. Input slots other than the column are not shown.
    pub fn apply(&mut self, slot: SlotId, value: SlotValue) {
        match (slot, value) {
            (SlotId::SelectedColumn, SlotValue::Text(column)) => self.selected_column = column,
            (SlotId::TableData, SlotValue::Table(table)) => {
                self.table = table;
                self.table_generation += 1;
            }
            (SlotId::Chart, SlotValue::Chart(figure)) => self.chart = figure,
            (SlotId::StatusMessage, SlotValue::Status(status)) => self.status = status,
            (SlotId::CurrentFilename, SlotValue::OptionalText(name)) => {
                self.current_filename = name
            }
            (SlotId::FileList, SlotValue::FileList(files)) => self.file_list = files,
            (slot, value) if slot.is_input() => {
                tracing::trace!("Ignoring input slot {} ({:?})", slot, value.kind());
            }
            (slot, value) => {
                tracing::warn!("Unexpected {:?} value for slot {}", value.kind(), slot);
            }
        }
    }

    /// Shape label of the active table, e.g. "1704 rows × 6 columns"
    pub fn table_shape(&self) -> String {
        self.table.shape_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_codec::parse_csv;

    #[test]
    fn test_table_update_bumps_generation() {
        let mut topics = Topics::new("pop");
        let table = Arc::new(parse_csv(b"a\n1\n").unwrap());
        topics.apply(SlotId::TableData, SlotValue::Table(table));
        assert_eq!(topics.table_generation, 1);
        assert_eq!(topics.table.column_names(), vec!["a"]);
    }

    #[test]
    fn test_slot_update_message() {
        let mut topics = Topics::default();
        topics.apply_message(HostMessage::SlotUpdate(vec![
            (
                SlotId::StatusMessage,
                SlotValue::Status(StatusMessage::error("boom")),
            ),
            (
                SlotId::CurrentFilename,
                SlotValue::OptionalText(Some("20240101-000000_a.csv".into())),
            ),
            (SlotId::AppStart, SlotValue::Pulse(1)),
        ]));
        assert!(topics.status.is_error());
        assert_eq!(
            topics.current_filename.as_deref(),
            Some("20240101-000000_a.csv")
        );
    }

    #[test]
    fn test_mismatched_value_is_ignored() {
        let mut topics = Topics::new("lifeExp");
        topics.apply(SlotId::SelectedColumn, SlotValue::Pulse(3));
        assert_eq!(topics.selected_column, "lifeExp");
    }

    #[test]
    fn test_shutdown_message() {
        let mut topics = Topics::default();
        topics.apply_message(HostMessage::Shutdown);
        assert!(!topics.host_running);
    }
}
