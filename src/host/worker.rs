//! Host thread: owns the dataset store, the archive and the binding graph.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::thread::{self, JoinHandle};

use crate::archive::FileArchive;
use crate::binding::{
    BindingGraph, DispatchReport, HandlerContext, SlotId, SlotStore, SlotValue, SlotWrites,
    UiEvent,
};
use crate::config::ChartSettings;
use crate::data::store::DatasetStore;
use crate::host::bridge::{HostCommand, HostMessage};
use crate::types::StatusMessage;

/// Runs the binding graph on its own thread, one event at a time.
pub struct DashboardHost {
    store: DatasetStore,
    archive: FileArchive,
    graph: BindingGraph,
    chart: ChartSettings,
    slots: SlotStore,
    cmd_rx: Receiver<HostCommand>,
    msg_tx: Sender<HostMessage>,
    dropped_messages: u64,
}

impl DashboardHost {
    pub fn new(
        store: DatasetStore,
        archive: FileArchive,
        graph: BindingGraph,
        chart: ChartSettings,
        cmd_rx: Receiver<HostCommand>,
        msg_tx: Sender<HostMessage>,
    ) -> Self {
        let slots = SlotStore::with_selected_column(chart.default_column.clone());
        Self {
            store,
            archive,
            graph,
            chart,
            slots,
            cmd_rx,
            msg_tx,
            dropped_messages: 0,
        }
    }

    /// Spawn the host on a named thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("dashboard-host".to_string())
            .spawn(move || self.run())
    }

    /// Start up, then process commands until Shutdown or the UI hangs up.
    pub fn run(mut self) {
        tracing::info!("Dashboard host started");
        self.start();

        while let Ok(cmd) = self.cmd_rx.recv() {
            match cmd {
                HostCommand::Event(event) => {
                    self.handle_event(event);
                }
                HostCommand::Shutdown => break,
            }
        }

        self.try_send_message(HostMessage::Shutdown);
        tracing::info!(
            "Dashboard host exiting ({} messages dropped)",
            self.dropped_messages
        );
    }

    /// Load the default dataset and run the start event.
    ///
    /// A failed load leaves the empty dataset in place and shows a warning;
    /// the dashboard stays usable for uploads.
    pub fn start(&mut self) -> Option<DispatchReport> {
        let status = match self.store.load_default() {
            Ok(dataset) => StatusMessage::info(format!(
                "Loaded default dataset from {} ({})",
                self.store.source_description(),
                dataset.shape_label()
            )),
            Err(e) => {
                tracing::warn!("Default dataset unavailable: {}", e);
                StatusMessage::warning(format!(
                    "Default dataset unavailable, upload a CSV to begin ({})",
                    e
                ))
            }
        };

        let mut writes = UiEvent::Start.into_writes(&self.slots, self.store.current());
        writes.push(SlotId::StatusMessage, SlotValue::Status(status));
        self.dispatch_writes("start", writes)
    }

    /// Propagate one UI event and publish the changed slots.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<DispatchReport> {
        if event == UiEvent::Start {
            return self.start();
        }
        let label = event.label();
        let writes = event.into_writes(&self.slots, self.store.current());
        self.dispatch_writes(label, writes)
    }

    fn dispatch_writes(
        &mut self,
        label: &'static str,
        writes: SlotWrites,
    ) -> Option<DispatchReport> {
        let mut ctx = HandlerContext {
            store: &mut self.store,
            archive: &self.archive,
            chart: &self.chart,
        };
        let report = match self.graph.dispatch(&mut self.slots, &mut ctx, writes) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Event {} rejected: {}", label, e);
                return None;
            }
        };

        tracing::debug!(
            "Event {}: fired {:?}, changed {:?}",
            label,
            report.fired,
            report.changed
        );

        let update = report
            .changed
            .iter()
            .map(|&id| (id, self.slots.get(id).clone()))
            .collect();
        self.try_send_message(HostMessage::SlotUpdate(update));
        self.try_send_message(HostMessage::Report {
            event: label,
            report: report.clone(),
        });
        Some(report)
    }

    /// Try to send a message, tracking dropped messages if the queue is full
    ///
    /// Uses try_send() so a UI that stops draining can never stall the host.
    fn try_send_message(&mut self, msg: HostMessage) {
        match self.msg_tx.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped_messages += 1;
                tracing::warn!(
                    "UI message queue full, dropped message ({} total)",
                    self.dropped_messages
                );
            }
            // UI already gone; the command loop ends on its own
            Err(TrySendError::Disconnected(_)) => {}
        }
    }

    /// Messages dropped because the UI queue was full
    pub fn dropped_messages(&self) -> u64 {
        self.dropped_messages
    }

    pub fn slots(&self) -> &SlotStore {
        &self.slots
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn archive(&self) -> &FileArchive {
        &self.archive
    }
}
