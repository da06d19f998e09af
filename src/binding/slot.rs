//! Slots: the named, typed observable values of the dashboard.
//!
//! Every slot has a fixed [`SlotKind`]. Input slots are written only by UI
//! events; derived slots are written only by binding edges.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::binding::error::{BindingError, BindingResult};
use crate::data::aggregate::ChartFigure;
use crate::types::{ArchivedFile, Dataset, StatusMessage, Upload};

/// Identifier of every slot in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotId {
    // --- Inputs (written by UI events) ---
    /// Pulsed once when the dashboard starts
    AppStart,
    /// Latest upload from the file-drop input
    UploadContents,
    /// Render index of the clicked archive entry
    FileListClick,
    /// Pulsed by the archive pane's refresh button
    FileListRefresh,
    /// Pulsed by "reset to default dataset"
    ResetDataset,
    /// Column chosen for aggregation
    SelectedColumn,

    // --- Derived (written by edges) ---
    TableData,
    Chart,
    StatusMessage,
    CurrentFilename,
    FileList,
}

impl SlotId {
    pub const ALL: [SlotId; 11] = [
        SlotId::AppStart,
        SlotId::UploadContents,
        SlotId::FileListClick,
        SlotId::FileListRefresh,
        SlotId::ResetDataset,
        SlotId::SelectedColumn,
        SlotId::TableData,
        SlotId::Chart,
        SlotId::StatusMessage,
        SlotId::CurrentFilename,
        SlotId::FileList,
    ];

    /// Stable `component.property` style name
    pub fn name(self) -> &'static str {
        match self {
            SlotId::AppStart => "app.start",
            SlotId::UploadContents => "upload.contents",
            SlotId::FileListClick => "file-list.click",
            SlotId::FileListRefresh => "file-list.refresh",
            SlotId::ResetDataset => "dataset.reset",
            SlotId::SelectedColumn => "column-radio.value",
            SlotId::TableData => "table.data",
            SlotId::Chart => "graph.figure",
            SlotId::StatusMessage => "status.children",
            SlotId::CurrentFilename => "current-file.children",
            SlotId::FileList => "file-list.children",
        }
    }

    pub fn kind(self) -> SlotKind {
        match self {
            SlotId::AppStart | SlotId::FileListRefresh | SlotId::ResetDataset => SlotKind::Pulse,
            SlotId::UploadContents => SlotKind::Upload,
            SlotId::FileListClick => SlotKind::Index,
            SlotId::SelectedColumn => SlotKind::Text,
            SlotId::TableData => SlotKind::Table,
            SlotId::Chart => SlotKind::Chart,
            SlotId::StatusMessage => SlotKind::Status,
            SlotId::CurrentFilename => SlotKind::OptionalText,
            SlotId::FileList => SlotKind::FileList,
        }
    }

    /// Whether the slot is written by the UI rather than by an edge
    pub fn is_input(self) -> bool {
        matches!(
            self,
            SlotId::AppStart
                | SlotId::UploadContents
                | SlotId::FileListClick
                | SlotId::FileListRefresh
                | SlotId::ResetDataset
                | SlotId::SelectedColumn
        )
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value type of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Pulse,
    Upload,
    Index,
    Text,
    OptionalText,
    Table,
    Chart,
    Status,
    FileList,
}

/// A slot value
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    /// Monotonic counter; every write is a new pulse
    Pulse(u64),
    Upload(Option<Upload>),
    Index(Option<usize>),
    Text(String),
    OptionalText(Option<String>),
    Table(Arc<Dataset>),
    Chart(ChartFigure),
    Status(StatusMessage),
    FileList(Vec<ArchivedFile>),
}

impl SlotValue {
    pub fn kind(&self) -> SlotKind {
        match self {
            SlotValue::Pulse(_) => SlotKind::Pulse,
            SlotValue::Upload(_) => SlotKind::Upload,
            SlotValue::Index(_) => SlotKind::Index,
            SlotValue::Text(_) => SlotKind::Text,
            SlotValue::OptionalText(_) => SlotKind::OptionalText,
            SlotValue::Table(_) => SlotKind::Table,
            SlotValue::Chart(_) => SlotKind::Chart,
            SlotValue::Status(_) => SlotKind::Status,
            SlotValue::FileList(_) => SlotKind::FileList,
        }
    }

    /// Initial value of a slot before any event
    pub fn initial(id: SlotId) -> Self {
        match id.kind() {
            SlotKind::Pulse => SlotValue::Pulse(0),
            SlotKind::Upload => SlotValue::Upload(None),
            SlotKind::Index => SlotValue::Index(None),
            SlotKind::Text => SlotValue::Text(String::new()),
            SlotKind::OptionalText => SlotValue::OptionalText(None),
            SlotKind::Table => SlotValue::Table(Arc::new(Dataset::empty())),
            SlotKind::Chart => SlotValue::Chart(ChartFigure::placeholder("No data loaded")),
            SlotKind::Status => SlotValue::Status(StatusMessage::default()),
            SlotKind::FileList => SlotValue::FileList(Vec::new()),
        }
    }
}

/// Canonical value of every slot
#[derive(Debug, Clone)]
pub struct SlotStore {
    values: HashMap<SlotId, SlotValue>,
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore {
    pub fn new() -> Self {
        Self {
            values: SlotId::ALL
                .iter()
                .map(|&id| (id, SlotValue::initial(id)))
                .collect(),
        }
    }

    /// Store with `SelectedColumn` preset
    pub fn with_selected_column(column: impl Into<String>) -> Self {
        let mut store = Self::new();
        store
            .values
            .insert(SlotId::SelectedColumn, SlotValue::Text(column.into()));
        store
    }

    pub fn get(&self, id: SlotId) -> &SlotValue {
        // Every id is inserted by the constructor and never removed.
        &self.values[&id]
    }

    /// Write a value, enforcing the slot's declared kind.
    pub fn set(&mut self, id: SlotId, value: SlotValue) -> BindingResult<()> {
        check_kind(id, &value)?;
        self.values.insert(id, value);
        Ok(())
    }

    pub fn pulse_count(&self, id: SlotId) -> u64 {
        match self.get(id) {
            SlotValue::Pulse(n) => *n,
            _ => 0,
        }
    }
}

pub(crate) fn check_kind(id: SlotId, value: &SlotValue) -> BindingResult<()> {
    if value.kind() != id.kind() {
        return Err(BindingError::TypeMismatch {
            slot: id,
            expected: id.kind(),
            found: value.kind(),
        });
    }
    Ok(())
}

/// Ordered set of slot writes produced by an event or a handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotWrites {
    writes: Vec<(SlotId, SlotValue)>,
}

impl SlotWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, id: SlotId, value: SlotValue) -> Self {
        self.push(id, value);
        self
    }

    /// Add a write; a later write to the same slot replaces the earlier one.
    pub fn push(&mut self, id: SlotId, value: SlotValue) {
        match self.writes.iter_mut().find(|(slot, _)| *slot == id) {
            Some(existing) => existing.1 = value,
            None => self.writes.push((id, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.writes.iter().map(|(id, _)| *id)
    }

    pub fn get(&self, id: SlotId) -> Option<&SlotValue> {
        self.writes
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SlotId, SlotValue)> {
        self.writes.iter()
    }
}

impl IntoIterator for SlotWrites {
    type Item = (SlotId, SlotValue);
    type IntoIter = std::vec::IntoIter<(SlotId, SlotValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
