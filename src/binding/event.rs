use std::sync::Arc;

use crate::binding::slot::{SlotId, SlotStore, SlotValue, SlotWrites};
use crate::types::{Dataset, Upload};

/// A user interaction, translated into input-slot writes by the host
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Dashboard opened
    Start,
    /// A file was picked or dropped
    Upload(Upload),
    /// Archive entry clicked, by render index
    FileClicked(usize),
    RefreshFiles,
    ColumnSelected(String),
    ResetDataset,
}

impl UiEvent {
    pub fn label(&self) -> &'static str {
        match self {
            UiEvent::Start => "start",
            UiEvent::Upload(_) => "upload",
            UiEvent::FileClicked(_) => "file-clicked",
            UiEvent::RefreshFiles => "refresh-files",
            UiEvent::ColumnSelected(_) => "column-selected",
            UiEvent::ResetDataset => "reset-dataset",
        }
    }

    /// Slot writes for this event.
    ///
    /// Pulses count up from the current slot value. `Start` also seeds the
    /// table with `initial_table` so the first chart renders without any
    /// other interaction.
    pub fn into_writes(self, slots: &SlotStore, initial_table: Arc<Dataset>) -> SlotWrites {
        let pulse = |id: SlotId| SlotValue::Pulse(slots.pulse_count(id) + 1);
        match self {
            UiEvent::Start => SlotWrites::new()
                .set(SlotId::AppStart, pulse(SlotId::AppStart))
                .set(SlotId::TableData, SlotValue::Table(initial_table)),
            UiEvent::Upload(upload) => {
                SlotWrites::new().set(SlotId::UploadContents, SlotValue::Upload(Some(upload)))
            }
            UiEvent::FileClicked(index) => {
                SlotWrites::new().set(SlotId::FileListClick, SlotValue::Index(Some(index)))
            }
            UiEvent::RefreshFiles => {
                SlotWrites::new().set(SlotId::FileListRefresh, pulse(SlotId::FileListRefresh))
            }
            UiEvent::ColumnSelected(column) => {
                SlotWrites::new().set(SlotId::SelectedColumn, SlotValue::Text(column))
            }
            UiEvent::ResetDataset => {
                SlotWrites::new().set(SlotId::ResetDataset, pulse(SlotId::ResetDataset))
            }
        }
    }
}
