//! Preview of uploaded patient tables.
//!
//! Display only: the columns are not checked against `PatientRecord` and
//! nothing read here reaches the prediction pipeline.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// First rows of an uploaded table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows in the whole file
    pub total_rows: usize,
}

impl TablePreview {
    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}

/// Read a CSV document and keep its first `max_rows` data rows.
///
/// Rows with a different field count than the header, non-UTF-8 content
/// and files without a header row are reported as `Error::MalformedUpload`.
pub fn preview_csv<R: Read>(reader: R, max_rows: usize) -> Result<TablePreview> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::MalformedUpload("file has no header row".to_string()));
    }

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for record in csv_reader.records() {
        let record = record.map_err(malformed)?;
        if rows.len() < max_rows {
            rows.push(record.iter().map(str::to_string).collect());
        }
        total_rows += 1;
    }

    Ok(TablePreview {
        headers,
        rows,
        total_rows,
    })
}

pub fn preview_file<P: AsRef<Path>>(path: P, max_rows: usize) -> Result<TablePreview> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let preview = preview_csv(file, max_rows)?;

    info!(
        path = %path.display(),
        columns = preview.headers.len(),
        rows = preview.total_rows,
        "Upload previewed"
    );
    Ok(preview)
}

fn malformed(e: csv::Error) -> Error {
    Error::MalformedUpload(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_first_rows() {
        let mut data = String::from("Name,Age\n");
        for i in 0..60 {
            data.push_str(&format!("patient{},{}\n", i, 20 + i));
        }

        let preview = preview_csv(data.as_bytes(), 50).unwrap();

        assert_eq!(preview.headers, vec!["Name", "Age"]);
        assert_eq!(preview.rows.len(), 50);
        assert_eq!(preview.total_rows, 60);
        assert!(preview.is_truncated());
        assert_eq!(preview.rows[0], vec!["patient0", "20"]);
    }

    #[test]
    fn test_arbitrary_columns_accepted() {
        let data = "foo,bar,baz\n1,2,3\n";
        let preview = preview_csv(data.as_bytes(), 50).unwrap();

        assert_eq!(preview.headers.len(), 3);
        assert!(!preview.is_truncated());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let data = "Age,BMI\n30,22.0\n45\n";
        let result = preview_csv(data.as_bytes(), 50);
        assert!(matches!(result, Err(Error::MalformedUpload(_))));
    }

    #[test]
    fn test_empty_file_rejected() {
        let result = preview_csv("".as_bytes(), 50);
        assert!(matches!(result, Err(Error::MalformedUpload(_))));
    }

    #[test]
    fn test_binary_file_rejected() {
        let data: &[u8] = &[0x41, 0x2c, 0x42, 0x0a, 0xff, 0xfe, 0x2c, 0x01, 0x0a];
        let result = preview_csv(data, 50);
        assert!(matches!(result, Err(Error::MalformedUpload(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = preview_file(dir.path().join("absent.csv"), 50);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
