//! CSV decoding and encoding for datasets.
//!
//! Input must be UTF-8, comma-delimited, with the header as the first
//! record. The only structural check beyond decoding is that every record
//! has the same number of fields as the header.

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{DashError, Result};
use crate::types::{Column, Dataset, Scalar};

/// Parse CSV bytes into a [`Dataset`].
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DashError::Parse(format!("not valid UTF-8 text ({})", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DashError::Parse("no header row".to_string()));
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for record in reader.records() {
        let record = record?;
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.values.push(Scalar::parse(field));
        }
    }

    Dataset::new(columns)
}

/// Encode a [`Dataset`] as CSV bytes (header + rows).
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(dataset.columns().iter().map(|c| c.name.as_str()))?;
    for index in 0..dataset.num_rows() {
        let Some(row) = dataset.row(index) else {
            break;
        };
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| DashError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let ds = parse_csv(b"region,value\nA,1\nB,2\n").unwrap();
        assert_eq!(ds.column_names(), vec!["region", "value"]);
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(
            ds.column("region").unwrap().values,
            vec![Scalar::Text("A".into()), Scalar::Text("B".into())]
        );
        assert_eq!(
            ds.column("value").unwrap().values,
            vec![Scalar::Number(1.0), Scalar::Number(2.0)]
        );
    }

    #[test]
    fn test_parse_header_only() {
        let ds = parse_csv(b"a,b,c\n").unwrap();
        assert_eq!(ds.column_names(), vec!["a", "b", "c"]);
        assert_eq!(ds.num_rows(), 0);
    }

    #[test]
    fn test_parse_empty_input_fails() {
        let err = parse_csv(b"").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_invalid_utf8_fails() {
        let err = parse_csv(&[0xff, 0xfe, 0x00, 0x81, b'\n']).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_parse_ragged_row_fails() {
        let err = parse_csv(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_duplicate_header_fails() {
        let err = parse_csv(b"a,a\n1,2\n").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_missing_and_quoted_fields() {
        let ds = parse_csv(b"name,score\n\"Doe, J\",\nSmith,3.5\n").unwrap();
        let names = &ds.column("name").unwrap().values;
        assert_eq!(names[0], Scalar::Text("Doe, J".into()));
        let scores = &ds.column("score").unwrap().values;
        assert_eq!(scores[0], Scalar::Missing);
        assert_eq!(scores[1], Scalar::Number(3.5));
    }

    #[test]
    fn test_parse_strips_bom() {
        let ds = parse_csv("\u{feff}x,y\n1,2\n".as_bytes()).unwrap();
        assert_eq!(ds.column_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_write_then_parse_keeps_structure() {
        let original = parse_csv(b"country,pop,continent\nChad,1.5e7,Africa\nPeru,,Americas\n")
            .unwrap();
        let bytes = write_csv(&original).unwrap();
        let reparsed = parse_csv(&bytes).unwrap();
        assert_eq!(reparsed, original);
    }
}
