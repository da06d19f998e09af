//! # DataDash-RS: CSV Data Dashboard
//!
//! A desktop dashboard that shows a tabular dataset as a paged table and a
//! grouped bar chart. Users upload CSV files, every upload is archived under
//! a timestamped name, and any archived file can be reopened later.
//!
//! ## Architecture
//!
//! - **Data**: CSV decoding, the default dataset source and the active-dataset store
//! - **Archive**: Timestamped storage of uploaded files in a flat directory
//! - **Binding**: A declarative graph of slots and edges that turns UI events
//!   into output updates in a deterministic order
//! - **Host**: Runs the binding graph on its own thread
//! - **Frontend**: Renders the UI using eframe/egui with egui_plot for the chart
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! Settings and session state are stored in the platform-appropriate data
//! directory under `dev.hxyulin.datadash-rs`:
//!
//! - **Linux**: `~/.local/share/dev.hxyulin.datadash-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.datadash-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.datadash-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use datadash_rs::{
//!     archive::{FileArchive, SystemClock},
//!     binding::default_graph,
//!     config::DashboardConfig,
//!     data::{source_from_location, DatasetStore},
//!     host::{DashboardHost, HostBridge},
//! };
//!
//! let config = DashboardConfig::load_or_default();
//! let store = DatasetStore::new(source_from_location(
//!     &config.default_source,
//!     config.fetch_timeout(),
//! ));
//! let archive = FileArchive::open(config.resolved_archive_dir()?, Box::new(SystemClock))?;
//!
//! let (bridge, cmd_rx, msg_tx) = HostBridge::new();
//! DashboardHost::new(store, archive, default_graph()?, config.chart.clone(), cmd_rx, msg_tx)
//!     .spawn()?;
//! ```

pub mod archive;
pub mod binding;
pub mod config;
pub mod data;
pub mod error;
pub mod frontend;
pub mod host;
pub mod types;

pub use error::{DashError, Result};
pub use types::*;
