//! Dataset file reading.
//!
//! Turns a call-data spreadsheet (CSV or Excel) into a raw [`Dataset`]:
//! the trimmed header row plus one string map per non-empty data row.
//! Schema and value validation happen later, in [`crate::ingest`].

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use tracing::debug;

use audit_core::error::{AuditError, Result};

/// A raw tabular dataset before any validation.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names in file order, trimmed.
    pub headers: Vec<String>,
    /// One map per non-empty data row, keyed by header. Cells are trimmed;
    /// a short row leaves its trailing columns absent from the map.
    pub rows: Vec<HashMap<String, String>>,
}

/// Read a call-data file into a [`Dataset`], dispatching on the extension.
///
/// `.csv` goes through the `csv` crate, `.xlsx` / `.xls` through `calamine`
/// (first worksheet, first row as header). Any other extension is an
/// [`AuditError::UnsupportedFormat`]; a readable file with no data rows is
/// an [`AuditError::EmptyDataset`].
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let dataset = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xls" => read_workbook(path)?,
        other => return Err(AuditError::UnsupportedFormat(other.to_string())),
    };

    if dataset.rows.is_empty() {
        return Err(AuditError::EmptyDataset(path.to_path_buf()));
    }

    debug!(
        path = %path.display(),
        columns = dataset.headers.len(),
        rows = dataset.rows.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

// ── CSV ────────────────────────────────────────────────────────────────────────

fn read_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| AuditError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AuditError::Csv(e.to_string()))?;
        let mut row = HashMap::new();
        for (idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.clone(), value.trim().to_string());
            }
        }
        if is_blank(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(Dataset { headers, rows })
}

// ── Excel ──────────────────────────────────────────────────────────────────────

fn read_workbook(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(AuditError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| AuditError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(AuditError::Workbook("workbook has no sheets".to_string()));
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AuditError::Workbook(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Err(AuditError::EmptyDataset(path.to_path_buf()));
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in sheet_rows {
        let mut row = HashMap::new();
        for (idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.clone(), cell.to_string().trim().to_string());
            }
        }
        if is_blank(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(Dataset { headers, rows })
}

/// A row whose cells are all empty carries no data and is skipped.
fn is_blank(row: &HashMap<String, String>) -> bool {
    row.values().all(|v| v.is_empty())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write `content` to `name` inside `dir` and return the full path.
    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        write!(f, "{content}").unwrap();
        path
    }

    const SAMPLE_CSV: &str = "\
customer_id,service_area,tot_call_cnt_d,call_drop_cnt_d
CUST-1,North East,200,3
CUST-2,Delhi,150,1
";

    // ── CSV parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_csv_headers_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "calls.csv", SAMPLE_CSV);

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(
            dataset.headers,
            vec!["customer_id", "service_area", "tot_call_cnt_d", "call_drop_cnt_d"]
        );
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(
            dataset.rows[0].get("customer_id"),
            Some(&"CUST-1".to_string())
        );
        assert_eq!(
            dataset.rows[1].get("tot_call_cnt_d"),
            Some(&"150".to_string())
        );
    }

    #[test]
    fn test_read_csv_trims_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "calls.csv",
            "customer_id,service_area,tot_call_cnt_d,call_drop_cnt_d\n CUST-1 , North East ,200,3\n",
        );

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(
            dataset.rows[0].get("service_area"),
            Some(&"North East".to_string())
        );
    }

    #[test]
    fn test_read_csv_skips_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "calls.csv",
            "customer_id,service_area,tot_call_cnt_d,call_drop_cnt_d\nCUST-1,Delhi,10,0\n,,,\nCUST-2,Delhi,20,1\n",
        );

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(dataset.rows.len(), 2);
    }

    #[test]
    fn test_read_csv_short_row_leaves_columns_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "calls.csv",
            "customer_id,service_area,tot_call_cnt_d,call_drop_cnt_d\nCUST-1,Delhi\n",
        );

        let dataset = read_dataset(&path).unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert!(dataset.rows[0].get("tot_call_cnt_d").is_none());
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn test_read_missing_file() {
        let err = read_dataset(Path::new("/no/such/calls.csv")).unwrap_err();
        assert!(matches!(err, AuditError::FileRead { .. }));
    }

    #[test]
    fn test_read_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "calls.pdf", "not a spreadsheet");

        let err = read_dataset(&path).unwrap_err();
        assert!(matches!(err, AuditError::UnsupportedFormat(ext) if ext == "pdf"));
    }

    #[test]
    fn test_read_header_only_csv_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "calls.csv",
            "customer_id,service_area,tot_call_cnt_d,call_drop_cnt_d\n",
        );

        let err = read_dataset(&path).unwrap_err();
        assert!(matches!(err, AuditError::EmptyDataset(_)));
    }

    #[test]
    fn test_read_missing_workbook() {
        let err = read_dataset(Path::new("/no/such/calls.xlsx")).unwrap_err();
        assert!(matches!(err, AuditError::FileRead { .. }));
    }
}
