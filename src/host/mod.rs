//! Dashboard host.
//!
//! The host runs on a dedicated thread and is the only owner of the dataset
//! store, the file archive and the canonical slot values. The UI sends
//! [`UiEvent`](crate::binding::UiEvent)s over a crossbeam channel and
//! receives the changed slots back, so events are processed strictly one at
//! a time.

pub mod bridge;
pub mod worker;

pub use bridge::{HostBridge, HostCommand, HostMessage};
pub use worker::DashboardHost;
