//! Reactive binding graph.
//!
//! Slots are named, typed values. Edges declare which slots fire them,
//! which they merely read, and which they write; a handler computes the
//! writes. The graph is validated and topologically ordered once at
//! construction, then every UI event is propagated in that order so each
//! edge fires at most once per event.
//!
//! # Architecture
//!
//! ```text
//! UiEvent ──► input slots ──► [upload_dataset] ──┐
//!                         ──► [select_archived_file] ──► table.data ──► [update_chart] ──► graph.figure
//!                         ──► [reset_dataset] ──┘
//!                         ──► [populate_file_list] ──► file-list.children
//! ```

pub mod catalog;
pub mod compiler;
pub mod edge;
pub mod error;
pub mod event;
pub mod graph;
pub mod handlers;
pub mod slot;

pub use catalog::{default_edges, default_graph};
pub use compiler::{BindingCompiler, CompiledPlan, PlanStats};
pub use edge::{BindingEdge, Handler, HandlerContext, SlotView};
pub use error::{BindingError, BindingResult};
pub use event::UiEvent;
pub use graph::{BindingGraph, DispatchReport, EdgeFailure};
pub use slot::{SlotId, SlotKind, SlotStore, SlotValue, SlotWrites};
