use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Canonical column names, in the fixed order every source file must follow.
/// Header names in the file itself are ignored and replaced by these.
pub const COLUMN_NAMES: [&str; 5] = ["date", "latitude", "longitude", "depth", "magnitude"];

/// Number of columns in a source file.
pub const COLUMN_COUNT: usize = COLUMN_NAMES.len();

// ---------------------------------------------------------------------------
// QuakeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single earthquake observation.
///
/// Timestamp, depth and magnitude are coerced per cell: a value that cannot be
/// parsed becomes `None` instead of failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub latitude: f64,
    pub longitude: f64,
    /// Hypocentre depth in kilometres.
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
}

impl QuakeRecord {
    /// Timestamp as seconds since the Unix epoch, the x coordinate used by
    /// the time-based charts.
    pub fn time_seconds(&self) -> Option<f64> {
        self.timestamp
            .map(|ts| ts.and_utc().timestamp_millis() as f64 / 1000.0)
    }
}

/// Formats an optional cell the way the dashboard prints missing values.
pub struct Cell<'a, T>(pub &'a Option<T>);

impl fmt::Display for Cell<'_, NaiveDateTime> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "<unknown>"),
        }
    }
}

impl fmt::Display for Cell<'_, f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// QuakeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct QuakeDataset {
    /// All records in source row order.
    pub records: Vec<QuakeRecord>,
    /// File the records were read from.
    pub source: PathBuf,
}

impl QuakeDataset {
    pub fn from_records(records: Vec<QuakeRecord>, source: &Path) -> Self {
        QuakeDataset {
            records,
            source: source.to_path_buf(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts of cells that were recovered as null during loading.
    pub fn null_counts(&self) -> NullCounts {
        self.records.iter().fold(NullCounts::default(), |mut acc, r| {
            acc.timestamp += usize::from(r.timestamp.is_none());
            acc.depth += usize::from(r.depth_km.is_none());
            acc.magnitude += usize::from(r.magnitude.is_none());
            acc
        })
    }

    /// Smallest and largest non-null magnitude.
    pub fn magnitude_range(&self) -> Option<(f64, f64)> {
        min_max(self.records.iter().filter_map(|r| r.magnitude))
    }

    /// Earliest and latest timestamp.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut dated = self.records.iter().filter_map(|r| r.timestamp);
        let first = dated.next()?;
        Some(dated.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }
}

/// Per-column count of null cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCounts {
    pub timestamp: usize,
    pub depth: usize,
    pub magnitude: usize,
}

impl NullCounts {
    pub fn any(&self) -> bool {
        self.timestamp + self.depth + self.magnitude > 0
    }
}

/// Min and max of a sequence of floats, ignoring NaN.
pub fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| !v.is_nan()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
