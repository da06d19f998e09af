//! Dataset store: owner of the active dataset.
//!
//! The store holds exactly one dataset at a time and replaces it wholesale.
//! Failed loads never touch the active dataset. The binding host owns the
//! single instance and lends it to handlers; there is no global state.

use std::sync::Arc;

use crate::data::csv_codec::parse_csv;
use crate::data::source::DatasetSource;
use crate::error::{DashError, Result};
use crate::types::Dataset;

/// Where the active dataset came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetOrigin {
    /// Nothing loaded yet (empty sentinel)
    #[default]
    Empty,
    /// The configured default source
    Default { source: String },
    /// A fresh upload
    Upload { name: String },
    /// A file selected from the archive
    Archive { name: String },
}

impl DatasetOrigin {
    pub fn label(&self) -> String {
        match self {
            DatasetOrigin::Empty => "no dataset".to_string(),
            DatasetOrigin::Default { source } => format!("default dataset ({})", source),
            DatasetOrigin::Upload { name } => format!("upload {}", name),
            DatasetOrigin::Archive { name } => format!("archived file {}", name),
        }
    }
}

/// Saved store state for rolling back a replace
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    dataset: Arc<Dataset>,
    origin: DatasetOrigin,
}

/// Holds the currently active dataset
pub struct DatasetStore {
    source: Box<dyn DatasetSource>,
    active: Arc<Dataset>,
    origin: DatasetOrigin,
}

impl DatasetStore {
    /// Create a store that starts with the empty sentinel.
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source,
            active: Arc::new(Dataset::empty()),
            origin: DatasetOrigin::Empty,
        }
    }

    /// Fetch and parse the default dataset.
    ///
    /// Fetch failures are `SourceUnavailable`; the previous dataset is kept
    /// on any failure.
    pub fn load_default(&mut self) -> Result<Arc<Dataset>> {
        let source = self.source.describe();
        let bytes = self.source.fetch()?;
        let dataset = parse_csv(&bytes).map_err(|e| match e {
            DashError::Parse(msg) => DashError::Parse(format!("{}: {}", source, msg)),
            other => other,
        })?;
        tracing::info!("Loaded default dataset from {} ({})", source, dataset.shape_label());
        Ok(self.replace(dataset, DatasetOrigin::Default { source }))
    }

    /// Parse uploaded bytes and make them the active dataset.
    pub fn load_from_bytes(&mut self, bytes: &[u8], original_name: &str) -> Result<Arc<Dataset>> {
        let dataset = parse_csv(bytes)?;
        tracing::debug!("Parsed upload {} ({})", original_name, dataset.shape_label());
        Ok(self.replace(
            dataset,
            DatasetOrigin::Upload {
                name: original_name.to_string(),
            },
        ))
    }

    /// Replace the active dataset wholesale.
    pub fn replace(&mut self, dataset: Dataset, origin: DatasetOrigin) -> Arc<Dataset> {
        self.active = Arc::new(dataset);
        self.origin = origin;
        Arc::clone(&self.active)
    }

    /// Ordered column names of the active dataset
    pub fn current_columns(&self) -> Vec<String> {
        self.active.column_names()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.active.has_column(name)
    }

    /// Shared handle to the active dataset
    pub fn current(&self) -> Arc<Dataset> {
        Arc::clone(&self.active)
    }

    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            dataset: Arc::clone(&self.active),
            origin: self.origin.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.active = snapshot.dataset;
        self.origin = snapshot.origin;
    }
}
