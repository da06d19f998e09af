//! Binding edges and the context handlers run in.

use std::fmt;
use std::sync::Arc;

use crate::archive::FileArchive;
use crate::binding::error::{BindingError, BindingResult};
use crate::binding::slot::{SlotId, SlotStore, SlotValue, SlotWrites};
use crate::config::ChartSettings;
use crate::data::store::DatasetStore;
use crate::error::Result;
use crate::types::{ArchivedFile, Dataset, Upload};

/// Handler function of an edge.
///
/// Handlers may mutate the dataset store and the archive; everything else
/// they affect goes through the returned writes.
pub type Handler = fn(&mut HandlerContext<'_>, &SlotView<'_>) -> Result<SlotWrites>;

/// Services lent to a handler for one invocation
pub struct HandlerContext<'a> {
    pub store: &'a mut DatasetStore,
    pub archive: &'a FileArchive,
    pub chart: &'a ChartSettings,
}

/// A declared dependency between slots
#[derive(Clone)]
pub struct BindingEdge {
    pub name: &'static str,
    /// Slots whose change fires the edge
    pub triggers: Vec<SlotId>,
    /// Slots read without firing the edge
    pub context: Vec<SlotId>,
    pub outputs: Vec<SlotId>,
    /// Status slot that receives handler failures
    pub error_slot: Option<SlotId>,
    pub handler: Handler,
}

impl BindingEdge {
    pub fn new(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            triggers: Vec::new(),
            context: Vec::new(),
            outputs: Vec::new(),
            error_slot: None,
            handler,
        }
    }

    pub fn trigger(mut self, slot: SlotId) -> Self {
        self.triggers.push(slot);
        self
    }

    pub fn context(mut self, slot: SlotId) -> Self {
        self.context.push(slot);
        self
    }

    pub fn output(mut self, slot: SlotId) -> Self {
        self.outputs.push(slot);
        self
    }

    /// Route handler failures to `slot`, which must also be an output.
    pub fn errors_to(mut self, slot: SlotId) -> Self {
        self.error_slot = Some(slot);
        self
    }

    pub fn reads(&self, slot: SlotId) -> bool {
        self.triggers.contains(&slot) || self.context.contains(&slot)
    }

    pub fn writes(&self, slot: SlotId) -> bool {
        self.outputs.contains(&slot)
    }

    pub fn is_triggered_by(&self, slot: SlotId) -> bool {
        self.triggers.contains(&slot)
    }
}

impl fmt::Debug for BindingEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingEdge")
            .field("name", &self.name)
            .field("triggers", &self.triggers)
            .field("context", &self.context)
            .field("outputs", &self.outputs)
            .field("error_slot", &self.error_slot)
            .finish_non_exhaustive()
    }
}

/// Read access to the slots an edge declared
pub struct SlotView<'a> {
    slots: &'a SlotStore,
    edge: &'a BindingEdge,
}

impl<'a> SlotView<'a> {
    pub fn new(slots: &'a SlotStore, edge: &'a BindingEdge) -> Self {
        Self { slots, edge }
    }

    pub fn get(&self, slot: SlotId) -> BindingResult<&'a SlotValue> {
        if !self.edge.reads(slot) {
            return Err(BindingError::UndeclaredRead {
                edge: self.edge.name,
                slot,
            });
        }
        Ok(self.slots.get(slot))
    }

    fn mismatch(slot: SlotId, value: &SlotValue) -> BindingError {
        BindingError::TypeMismatch {
            slot,
            expected: slot.kind(),
            found: value.kind(),
        }
    }

    pub fn upload(&self, slot: SlotId) -> BindingResult<Option<&'a Upload>> {
        match self.get(slot)? {
            SlotValue::Upload(upload) => Ok(upload.as_ref()),
            other => Err(Self::mismatch(slot, other)),
        }
    }

    pub fn index(&self, slot: SlotId) -> BindingResult<Option<usize>> {
        match self.get(slot)? {
            SlotValue::Index(index) => Ok(*index),
            other => Err(Self::mismatch(slot, other)),
        }
    }

    pub fn text(&self, slot: SlotId) -> BindingResult<&'a str> {
        match self.get(slot)? {
            SlotValue::Text(text) => Ok(text.as_str()),
            other => Err(Self::mismatch(slot, other)),
        }
    }

    pub fn table(&self, slot: SlotId) -> BindingResult<&'a Arc<Dataset>> {
        match self.get(slot)? {
            SlotValue::Table(dataset) => Ok(dataset),
            other => Err(Self::mismatch(slot, other)),
        }
    }

    pub fn file_list(&self, slot: SlotId) -> BindingResult<&'a [ArchivedFile]> {
        match self.get(slot)? {
            SlotValue::FileList(files) => Ok(files.as_slice()),
            other => Err(Self::mismatch(slot, other)),
        }
    }
}
