use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the TRAI audit crates.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A required dataset column is absent from the header row.
    ///
    /// This is fatal for the whole analysis: nothing is ingested when the
    /// schema does not match.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV payload could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    /// An Excel workbook could not be opened or its sheet read.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// The dataset file extension is not one of the supported formats.
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// The dataset contains a header but no data rows (or no header at all).
    #[error("No data rows found in {0}")]
    EmptyDataset(PathBuf),

    /// A severity name string is not one of the recognised tiers.
    #[error("Invalid severity tier: {0}")]
    InvalidSeverity(String),

    /// A penalty-schedule override or other configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the audit crates.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_column() {
        let err = AuditError::MissingColumn("tot_call_cnt_d".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Missing required column: tot_call_cnt_d");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AuditError::FileRead {
            path: PathBuf::from("/some/calls.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/calls.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_csv() {
        let err = AuditError::Csv("unterminated quoted field".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Failed to parse CSV: unterminated quoted field");
    }

    #[test]
    fn test_error_display_workbook() {
        let err = AuditError::Workbook("sheet not found".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Failed to read workbook: sheet not found");
    }

    #[test]
    fn test_error_display_unsupported_format() {
        let err = AuditError::UnsupportedFormat("pdf".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Unsupported dataset format: pdf");
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let err = AuditError::EmptyDataset(PathBuf::from("/data/blank.csv"));
        let msg = err.to_string();
        assert_eq!(msg, "No data rows found in /data/blank.csv");
    }

    #[test]
    fn test_error_display_invalid_severity() {
        let err = AuditError::InvalidSeverity("catastrophic".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Invalid severity tier: catastrophic");
    }

    #[test]
    fn test_error_display_config() {
        let err = AuditError::Config("penalty schedule is not valid JSON".to_string());
        let msg = err.to_string();
        assert_eq!(msg, "Configuration error: penalty schedule is not valid JSON");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AuditError = io_err.into();
        let msg = err.to_string();
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: AuditError = json_err.into();
        let msg = err.to_string();
        assert!(msg.contains("Failed to parse JSON"));
    }
}
