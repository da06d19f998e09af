//! Test data builders for creating test objects

use std::path::{Path, PathBuf};
use std::sync::Arc;

use datadash_rs::archive::{FileArchive, FixedClock};
use datadash_rs::binding::{
    default_graph, DispatchReport, SlotId, SlotValue, UiEvent,
};
use datadash_rs::config::ChartSettings;
use datadash_rs::data::{ChartFigure, DatasetStore, FileSource};
use datadash_rs::host::{DashboardHost, HostBridge};
use datadash_rs::{ArchivedFile, Dataset, StatusMessage, Upload};
use tempfile::TempDir;

use super::{test_instant, GAPMINDER_CSV};

/// Builder for a dashboard host backed by temporary directories
pub struct HostBuilder {
    default_csv: Option<String>,
    chart: ChartSettings,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            default_csv: Some(GAPMINDER_CSV.to_string()),
            chart: ChartSettings::default(),
        }
    }

    /// Contents of the default dataset file
    pub fn default_csv(mut self, csv: &str) -> Self {
        self.default_csv = Some(csv.to_string());
        self
    }

    /// Leave the default dataset file absent so the source fails
    pub fn without_default(mut self) -> Self {
        self.default_csv = None;
        self
    }

    pub fn group_column(mut self, column: &str) -> Self {
        self.chart.group_column = column.to_string();
        self
    }

    pub fn default_column(mut self, column: &str) -> Self {
        self.chart.default_column = column.to_string();
        self
    }

    pub fn build(self) -> TestHost {
        let dir = tempfile::tempdir().unwrap();
        let default_path = dir.path().join("default.csv");
        if let Some(csv) = &self.default_csv {
            std::fs::write(&default_path, csv).unwrap();
        }

        let archive_dir = dir.path().join("uploads");
        let archive =
            FileArchive::open(&archive_dir, Box::new(FixedClock::new(test_instant()))).unwrap();
        let store = DatasetStore::new(Box::new(FileSource::new(&default_path)));

        let (bridge, cmd_rx, msg_tx) = HostBridge::new();
        let host = DashboardHost::new(
            store,
            archive,
            default_graph().unwrap(),
            self.chart,
            cmd_rx,
            msg_tx,
        );

        TestHost {
            dir,
            archive_dir,
            host,
            bridge,
        }
    }

    /// Build and run the start event
    pub fn started(self) -> TestHost {
        let mut host = self.build();
        host.send(UiEvent::Start);
        host
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A host driven synchronously from the test thread
pub struct TestHost {
    pub dir: TempDir,
    pub archive_dir: PathBuf,
    pub host: DashboardHost,
    pub bridge: HostBridge,
}

impl TestHost {
    /// Dispatch one event and return its report
    pub fn send(&mut self, event: UiEvent) -> DispatchReport {
        let report = self
            .host
            .handle_event(event)
            .expect("event should be accepted by the graph");
        // Keep the bounded message channel from filling up
        self.bridge.drain();
        report
    }

    pub fn upload(&mut self, name: &str, bytes: &[u8]) -> DispatchReport {
        self.send(UiEvent::Upload(Upload::new(name, bytes.to_vec())))
    }

    pub fn select_column(&mut self, column: &str) -> DispatchReport {
        self.send(UiEvent::ColumnSelected(column.to_string()))
    }

    pub fn slot(&self, id: SlotId) -> &SlotValue {
        self.host.slots().get(id)
    }

    pub fn status(&self) -> StatusMessage {
        match self.slot(SlotId::StatusMessage) {
            SlotValue::Status(status) => status.clone(),
            other => panic!("status slot holds {:?}", other),
        }
    }

    pub fn chart(&self) -> ChartFigure {
        match self.slot(SlotId::Chart) {
            SlotValue::Chart(chart) => chart.clone(),
            other => panic!("chart slot holds {:?}", other),
        }
    }

    pub fn table(&self) -> Arc<Dataset> {
        match self.slot(SlotId::TableData) {
            SlotValue::Table(table) => table.clone(),
            other => panic!("table slot holds {:?}", other),
        }
    }

    pub fn file_list(&self) -> Vec<ArchivedFile> {
        match self.slot(SlotId::FileList) {
            SlotValue::FileList(files) => files.clone(),
            other => panic!("file list slot holds {:?}", other),
        }
    }

    pub fn current_filename(&self) -> Option<String> {
        match self.slot(SlotId::CurrentFilename) {
            SlotValue::OptionalText(name) => name.clone(),
            other => panic!("current filename slot holds {:?}", other),
        }
    }

    /// Active dataset according to the store (not the slot mirror)
    pub fn active(&self) -> Arc<Dataset> {
        self.host.store().current()
    }

    pub fn archive_path(&self, generated_name: &str) -> PathBuf {
        self.archive_dir.join(generated_name)
    }

    pub fn default_path(&self) -> PathBuf {
        self.dir.path().join("default.csv")
    }

    pub fn archive_root(&self) -> &Path {
        self.host.archive().root()
    }
}

