//! Binding-graph error types.

use thiserror::Error;

use crate::binding::slot::{SlotId, SlotKind};

/// Errors raised while building or running the binding graph.
///
/// These describe wiring mistakes, not user-facing failures; handler
/// failures are reported through status slots instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("edge '{0}' has no trigger slots")]
    NoTriggers(&'static str),

    #[error("duplicate edge name '{0}'")]
    DuplicateEdge(&'static str),

    #[error("edge '{edge}' routes errors to {slot}, which is not one of its outputs")]
    ErrorSlotNotOutput { edge: &'static str, slot: SlotId },

    #[error("error slot {slot} of edge '{edge}' is not a status slot")]
    ErrorSlotNotStatus { edge: &'static str, slot: SlotId },

    #[error("edge '{edge}' declares input slot {slot} as an output")]
    WritesInput { edge: &'static str, slot: SlotId },

    #[error("edges '{first}' and '{second}' both write {slot} on a shared trigger")]
    ConflictingOutputs {
        slot: SlotId,
        first: &'static str,
        second: &'static str,
    },

    #[error("cycle detected between edges {0:?}")]
    CycleDetected(Vec<&'static str>),

    #[error("edge '{edge}' read undeclared slot {slot}")]
    UndeclaredRead { edge: &'static str, slot: SlotId },

    #[error("edge '{edge}' wrote undeclared slot {slot}")]
    UndeclaredWrite { edge: &'static str, slot: SlotId },

    #[error("{slot} already written by '{first}' in this event, rejected write from '{second}'")]
    OutputConflict {
        slot: SlotId,
        first: &'static str,
        second: &'static str,
    },

    #[error("slot {slot} holds {expected:?} values, got {found:?}")]
    TypeMismatch {
        slot: SlotId,
        expected: SlotKind,
        found: SlotKind,
    },
}

pub type BindingResult<T> = std::result::Result<T, BindingError>;
