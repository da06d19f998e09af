//! Dataset sources for the default dataset
//!
//! This module provides a common trait for everything that can produce the
//! bytes of the default dataset, enabling both the remote HTTP source and a
//! local file (offline use, tests) behind one interface.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DashError, Result};

/// The gapminder 2007 extract the dashboard ships with
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/gapminder2007.csv";

/// Something that can fetch the raw CSV bytes of a dataset.
///
/// Failures are reported as [`DashError::SourceUnavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait DatasetSource: Send {
    /// Human-readable location, used in status text and logs
    fn describe(&self) -> String;

    /// Fetch the raw bytes
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) source
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Fetching dataset from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DashError::SourceUnavailable(format!("HTTP client: {}", e)))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| DashError::SourceUnavailable(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashError::SourceUnavailable(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| DashError::SourceUnavailable(format!("{}: {}", self.url, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Local file source
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            DashError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}

/// Pick a source for a configured location: URLs go over HTTP, anything
/// else is treated as a local path.
pub fn source_from_location(location: &str, timeout: Duration) -> Box<dyn DatasetSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location, timeout))
    } else {
        Box::new(FileSource::new(location))
    }
}
