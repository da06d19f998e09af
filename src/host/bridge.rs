//! Thread boundary between the dashboard host and the UI.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::time::Duration;

use crate::binding::{DispatchReport, SlotId, SlotValue, UiEvent};

/// Messages sent from the host to the UI thread.
#[derive(Debug, Clone)]
pub enum HostMessage {
    /// New values of the slots changed by one event.
    SlotUpdate(Vec<(SlotId, SlotValue)>),

    /// Outcome of dispatching one event.
    Report {
        event: &'static str,
        report: DispatchReport,
    },

    /// Host is shutting down.
    Shutdown,
}

/// Commands sent from the UI thread to the host.
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Propagate a user interaction through the binding graph.
    Event(UiEvent),
    /// Shut down the host thread.
    Shutdown,
}

/// Channel capacity for commands (UI → host).
const CMD_CHANNEL_CAPACITY: usize = 256;
/// Channel capacity for messages (host → UI).
const MSG_CHANNEL_CAPACITY: usize = 10_000;

/// UI-side handle for communicating with the host thread.
pub struct HostBridge {
    pub cmd_tx: Sender<HostCommand>,
    pub msg_rx: Receiver<HostMessage>,
}

impl HostBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The host thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<HostCommand>, Sender<HostMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<HostMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking.
    pub fn try_recv(&self) -> Option<HostMessage> {
        self.msg_rx.try_recv().ok()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HostMessage> {
        self.msg_rx.recv_timeout(timeout).ok()
    }

    /// Queue an event without blocking.
    ///
    /// Fails with `Full` while the host is behind and `Disconnected` once
    /// it has stopped.
    pub fn send_event(&self, event: UiEvent) -> Result<(), TrySendError<HostCommand>> {
        self.cmd_tx.try_send(HostCommand::Event(event))
    }

    /// Ask the host to stop. Waits for queue space if the host is behind.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(HostCommand::Shutdown);
    }
}
