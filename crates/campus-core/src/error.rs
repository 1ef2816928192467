use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the campus tools.
#[derive(Error, Debug)]
pub enum CampusError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A tabular file is empty or lacks a required column.
    #[error("Invalid file layout: {0}")]
    Layout(String),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A numeric field could not be parsed or was not finite.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// The chart backend failed while drawing.
    #[error("Render error: {0}")]
    Render(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the campus crates.
pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CampusError::FileRead {
            path: PathBuf::from("/data/library.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/library.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CampusError::FileWrite {
            path: PathBuf::from("/out/summary.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to write file /out/summary.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = CampusError::TimestampParse("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: yesterday");
    }

    #[test]
    fn test_error_display_invalid_number() {
        let err = CampusError::InvalidNumber("12kw".to_string());
        assert_eq!(err.to_string(), "Invalid number: 12kw");
    }

    #[test]
    fn test_error_display_layout() {
        let err = CampusError::Layout("empty file".to_string());
        assert_eq!(err.to_string(), "Invalid file layout: empty file");
    }

    #[test]
    fn test_error_display_render() {
        let err = CampusError::Render("backend closed".to_string());
        assert_eq!(err.to_string(), "Render error: backend closed");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CampusError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: CampusError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
