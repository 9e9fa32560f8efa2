use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while loading a source file. Anything that can be
/// recovered per cell never reaches this type.
///
/// `row` counts data rows from 1; the header row is not counted.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("expected {expected} columns (date, latitude, longitude, depth, magnitude), found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("{0}")]
    Malformed(String),

    #[error("data row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("data row {row}: invalid {column} value '{value}'")]
    InvalidCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("malformed spreadsheet")]
    Spreadsheet(#[from] calamine::Error),

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet file")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading parquet record batch")]
    Arrow(#[from] arrow::error::ArrowError),
}
