//! Data layer: CSV decoding, dataset sources, the active-dataset store and
//! chart aggregation.
//!
//! # Architecture
//!
//! ```text
//! [DatasetSource] ──fetch──► bytes ──parse_csv──► [DatasetStore] ──► group_average ──► ChartFigure
//!                                                      ▲
//!                      upload / archive bytes ─────────┘
//! ```

pub mod aggregate;
pub mod csv_codec;
pub mod source;
pub mod store;

pub use aggregate::{group_average, ChartBar, ChartFigure};
pub use csv_codec::{parse_csv, write_csv};
pub use source::{source_from_location, DatasetSource, FileSource, HttpSource, DEFAULT_DATASET_URL};
pub use store::{DatasetOrigin, DatasetStore, StoreSnapshot};
