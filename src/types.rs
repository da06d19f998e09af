//! Core data types for DataDash-RS
//!
//! This module contains the fundamental types shared by the data layer,
//! the archive, the binding graph and the UI.
//!
//! # Main Types
//!
//! - [`Dataset`] - In-memory table of named, equal-length columns
//! - [`Scalar`] - A single cell value (number, text or missing)
//! - [`ArchivedFile`] - Metadata for one file in the upload archive
//! - [`Upload`] - Raw bytes handed over by the file-drop input
//! - [`StatusMessage`] - User-visible outcome of the last action

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Number(f64),
    Text(String),
    /// Empty CSV field
    Missing,
}

impl Scalar {
    /// Classify a raw CSV field.
    ///
    /// Non-finite spellings such as "NaN" or "inf" stay text.
    pub fn parse(field: &str) -> Self {
        if field.is_empty() {
            return Scalar::Missing;
        }
        match field.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Scalar::Number(v),
            _ => Scalar::Text(field.to_string()),
        }
    }

    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Scalar::Missing)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Missing => Ok(()),
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Scalar>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column is numeric when it holds no text cells and at least one number.
    pub fn is_numeric(&self) -> bool {
        let mut any_number = false;
        for value in &self.values {
            match value {
                Scalar::Text(_) => return false,
                Scalar::Number(_) => any_number = true,
                Scalar::Missing => {}
            }
        }
        any_number
    }
}

/// In-memory tabular dataset.
///
/// Columns are ordered, names are unique and every column has the same
/// length. A dataset is never mutated in place; it is replaced wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, checking the column invariants.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let len = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != len) {
                return Err(DashError::Parse(format!(
                    "column '{}' has {} values, expected {}",
                    bad.name,
                    bad.values.len(),
                    len
                )));
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DashError::Parse(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// The empty sentinel used before any dataset has been loaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Cells of row `index`, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Scalar>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    pub fn is_numeric_column(&self, name: &str) -> bool {
        self.column(name).map(Column::is_numeric).unwrap_or(false)
    }

    /// Short "rows × columns" description for status text
    pub fn shape_label(&self) -> String {
        format!("{} rows × {} columns", self.num_rows(), self.num_columns())
    }
}

/// Metadata for a file stored in the upload archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedFile {
    /// Unique name inside the archive directory
    pub generated_name: String,
    /// Name the file had when it was uploaded (sanitized)
    pub original_name: String,
    /// Full path of the stored bytes
    pub path: PathBuf,
    /// Timestamp encoded in the generated name
    pub created_at: Option<NaiveDateTime>,
}

/// Raw upload handed over by the file-drop input
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub original_name: String,
    pub bytes: Arc<[u8]>,
}

impl Upload {
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("original_name", &self.original_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// User-visible outcome of the last action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}
