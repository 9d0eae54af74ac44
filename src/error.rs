use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the grid, persistence and export engines.
///
/// Everything else (empty selection, oversized header counts, paste
/// overflow) is clamped silently rather than reported.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("could not load grid from {}: {reason}", path.display())]
    LoadFailure { path: PathBuf, reason: String },

    #[error("could not save grid to {}", path.display())]
    SaveFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown grid type: {0}")]
    UnknownGridType(String),
}

pub type GridResult<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::OutOfRange {
            row: 4,
            col: 1,
            rows: 3,
            cols: 3,
        };
        assert_eq!(err.to_string(), "cell (4, 1) is outside the 3x3 grid");

        let err = GridError::UnknownGridType("tabularx".to_string());
        assert_eq!(err.to_string(), "unknown grid type: tabularx");

        let err = GridError::LoadFailure {
            path: PathBuf::from("table.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().starts_with("could not load grid from table.json"));
    }
}
