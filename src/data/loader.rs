use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float64Type, Int64Type, TimeUnit, TimestampMillisecondType,
};
use arrow::util::display::array_value_to_string;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{COLUMN_COUNT, COLUMN_NAMES, QuakeDataset, QuakeRecord};

type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an earthquake dataset from a file.  Dispatch by extension.
///
/// Every format carries the same five columns in fixed order:
/// date, latitude, longitude, depth (km), magnitude.
///
/// Supported formats:
/// * `.xlsx` / `.xls` / `.xlsb` / `.ods` – first worksheet, header row first
/// * `.csv`     – header row followed by five-cell rows, `,` or `;` separated
/// * `.json`    – `[[date, lat, lon, depth, mag], ...]` or records keyed by
///   the canonical column names
/// * `.parquet` – five columns, dates as timestamps or strings
///
/// Unparseable dates, depths and magnitudes become `None`. Anything else
/// that does not fit the layout fails the whole load. Row numbers in errors
/// count data rows from 1, not including the header.
pub fn load_file(path: &Path) -> Result<QuakeDataset> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_spreadsheet(path)?,
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let dataset = QuakeDataset::from_records(records, path);
    let nulls = dataset.null_counts();
    if nulls.any() {
        log::warn!(
            "{}: coerced {} dates, {} depths and {} magnitudes to null",
            path.display(),
            nulls.timestamp,
            nulls.depth,
            nulls.magnitude
        );
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
];

// Month-first wins over day-first when both would parse.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse a date/time cell, returning `None` for anything unrecognised.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a numeric cell. Empty, non-numeric and NaN cells are `None`.
///
/// A single `,` with no `.` is read as a decimal comma (`4,5`), as written by
/// spreadsheets in comma-decimal locales.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let parsed = match s.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) if s.matches(',').count() == 1 && !s.contains('.') => {
            s.replace(',', ".").parse::<f64>().ok()
        }
        Err(_) => None,
    };
    parsed.filter(|v| !v.is_nan())
}

/// Latitude and longitude are never coerced; `raw` renders the offending
/// cell for the error.
fn coordinate(
    value: Option<f64>,
    raw: impl FnOnce() -> String,
    row: usize,
    column: &'static str,
) -> Result<f64> {
    value.ok_or_else(|| LoadError::InvalidCoordinate {
        row,
        column,
        value: raw(),
    })
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Read the first worksheet: one header row (names ignored), then five
/// columns per row. Fully blank rows are skipped.
fn load_spreadsheet(path: &Path) -> Result<Vec<QuakeRecord>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Malformed("workbook has no worksheets".into()))??;

    let mut rows = range.rows();
    let found = rows.next().map_or(0, |header| header.len());
    if found != COLUMN_COUNT {
        return Err(LoadError::ColumnCount {
            expected: COLUMN_COUNT,
            found,
        });
    }

    rows.enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|(row_no, row)| {
            let row_no = row_no + 1;
            Ok(QuakeRecord {
                timestamp: sheet_timestamp(&row[0]),
                latitude: coordinate(sheet_number(&row[1]), || row[1].to_string(), row_no, COLUMN_NAMES[1])?,
                longitude: coordinate(sheet_number(&row[2]), || row[2].to_string(), row_no, COLUMN_NAMES[2])?,
                depth_km: sheet_number(&row[3]),
                magnitude: sheet_number(&row[4]),
            })
        })
        .collect()
}

/// Excel date cells carry their own type; text cells go through the
/// string parser.
fn sheet_timestamp(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime(),
        Data::DateTimeIso(s) | Data::String(s) => parse_timestamp(s),
        _ => None,
    }
}

fn sheet_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(v) => Some(*v).filter(|v| !v.is_nan()),
        Data::Int(v) => Some(*v as f64),
        Data::String(s) => parse_number(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one header row (names ignored), then rows of exactly five
/// cells. A ragged row is a parse error.
///
/// Cells are decoded one at a time, so a cell that is not valid UTF-8 only
/// nulls that cell (or fails the load if it is a coordinate).
fn load_csv(path: &Path) -> Result<Vec<QuakeRecord>> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(sniff_delimiter(&bytes))
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let found = reader
        .byte_headers()
        .map_err(|e| csv_error(path, e))?
        .len();
    if found != COLUMN_COUNT {
        return Err(LoadError::ColumnCount {
            expected: COLUMN_COUNT,
            found,
        });
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let row = result.map_err(|e| csv_error(path, e))?;
        let row_no = row_no + 1;
        let text = |i: usize| row.get(i).and_then(|b| std::str::from_utf8(b).ok());
        let lossy = |i: usize| String::from_utf8_lossy(row.get(i).unwrap_or_default()).into_owned();

        records.push(QuakeRecord {
            timestamp: text(0).and_then(parse_timestamp),
            latitude: coordinate(text(1).and_then(parse_number), || lossy(1), row_no, COLUMN_NAMES[1])?,
            longitude: coordinate(text(2).and_then(parse_number), || lossy(2), row_no, COLUMN_NAMES[2])?,
            depth_km: text(3).and_then(parse_number),
            magnitude: text(4).and_then(parse_number),
        });
    }

    Ok(records)
}

/// `;` when the header line has more semicolons than commas (spreadsheet
/// exports in comma-decimal locales), `,` otherwise.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    let count = |needle: u8| header.iter().filter(|&&b| b == needle).count();
    if count(b';') > count(b',') {
        b';'
    } else {
        b','
    }
}

/// Keep I/O failures apart from malformed content.
fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    if !err.is_io_error() {
        return LoadError::Csv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => LoadError::Malformed(format!("{other:?}")),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON layout, either positional rows:
///
/// ```json
/// [["2023-01-01 04:10:00", -2.5, 118.1, 10.0, 4.2], ...]
/// ```
///
/// or records keyed by the canonical column names (the output of
/// `df.to_json(orient='records')` after renaming):
///
/// ```json
/// [{"date": 1672546200000, "latitude": -2.5, "longitude": 118.1,
///   "depth": 10.0, "magnitude": 4.2}, ...]
/// ```
///
/// Numeric dates are epoch milliseconds.
fn load_json(path: &Path) -> Result<Vec<QuakeRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    rows.iter()
        .enumerate()
        .map(|(row_no, row)| json_record(row, row_no + 1))
        .collect()
}

fn json_record(row: &JsonValue, row_no: usize) -> Result<QuakeRecord> {
    let cells: Vec<&JsonValue> = match row {
        JsonValue::Array(values) => {
            if values.len() != COLUMN_COUNT {
                return Err(LoadError::ColumnCount {
                    expected: COLUMN_COUNT,
                    found: values.len(),
                });
            }
            values.iter().collect()
        }
        JsonValue::Object(obj) => {
            if obj.len() != COLUMN_COUNT {
                return Err(LoadError::ColumnCount {
                    expected: COLUMN_COUNT,
                    found: obj.len(),
                });
            }
            COLUMN_NAMES
                .iter()
                .map(|name| {
                    obj.get(*name).ok_or_else(|| LoadError::MalformedRow {
                        row: row_no,
                        message: format!("missing '{name}' field"),
                    })
                })
                .collect::<Result<_>>()?
        }
        other => {
            return Err(LoadError::MalformedRow {
                row: row_no,
                message: format!("expected an array or object, got {other}"),
            })
        }
    };

    Ok(QuakeRecord {
        timestamp: json_timestamp(cells[0]),
        latitude: coordinate(json_number(cells[1]), || cells[1].to_string(), row_no, COLUMN_NAMES[1])?,
        longitude: coordinate(json_number(cells[2]), || cells[2].to_string(), row_no, COLUMN_NAMES[2])?,
        depth_km: json_number(cells[3]),
        magnitude: json_number(cells[4]),
    })
}

fn json_timestamp(val: &JsonValue) -> Option<NaiveDateTime> {
    match val {
        JsonValue::String(s) => parse_timestamp(s),
        JsonValue::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_number(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with exactly five columns.
///
/// - column 0: Timestamp (any unit, with or without zone), Date32, Date64
///   or string
/// - columns 1-4: any integer / float / decimal type, or string
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<QuakeRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let found = builder.schema().fields().len();
    if found != COLUMN_COUNT {
        return Err(LoadError::ColumnCount {
            expected: COLUMN_COUNT,
            found,
        });
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let row_offset = records.len() + 1;

        let timestamps = timestamp_column(batch.column(0), COLUMN_NAMES[0])?;
        let latitudes = number_column(batch.column(1), COLUMN_NAMES[1])?;
        let longitudes = number_column(batch.column(2), COLUMN_NAMES[2])?;
        let depths = number_column(batch.column(3), COLUMN_NAMES[3])?;
        let magnitudes = number_column(batch.column(4), COLUMN_NAMES[4])?;

        for row in 0..batch.num_rows() {
            let raw = |col: usize| array_value_to_string(batch.column(col), row).unwrap_or_default();
            records.push(QuakeRecord {
                timestamp: timestamps[row],
                latitude: coordinate(latitudes[row], || raw(1), row_offset + row, COLUMN_NAMES[1])?,
                longitude: coordinate(longitudes[row], || raw(2), row_offset + row, COLUMN_NAMES[2])?,
                depth_km: depths[row],
                magnitude: magnitudes[row],
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn unsupported(col: &ArrayRef, column: &str) -> LoadError {
    LoadError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: col.data_type().to_string(),
    }
}

/// Coerce a date column to optional timestamps.
///
/// Zoned timestamps are read as their UTC instant.
fn timestamp_column(col: &ArrayRef, column: &str) -> Result<Vec<Option<NaiveDateTime>>> {
    match col.data_type() {
        DataType::Utf8 => Ok(col
            .as_string::<i32>()
            .iter()
            .map(|v| v.and_then(parse_timestamp))
            .collect()),
        DataType::LargeUtf8 => Ok(col
            .as_string::<i64>()
            .iter()
            .map(|v| v.and_then(parse_timestamp))
            .collect()),
        DataType::Timestamp(unit, _) => {
            let unit = *unit;
            // Raw values are UTC regardless of the zone annotation.
            let raw = cast(col, &DataType::Int64)?;
            Ok(raw
                .as_primitive::<Int64Type>()
                .iter()
                .map(|v| {
                    let v = v?;
                    let dt = match unit {
                        TimeUnit::Second => DateTime::from_timestamp(v, 0),
                        TimeUnit::Millisecond => DateTime::from_timestamp_millis(v),
                        TimeUnit::Microsecond => DateTime::from_timestamp_micros(v),
                        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(v)),
                    };
                    dt.map(|dt| dt.naive_utc())
                })
                .collect())
        }
        DataType::Date32 | DataType::Date64 => {
            let millis = cast(col, &DataType::Timestamp(TimeUnit::Millisecond, None))?;
            Ok(millis
                .as_primitive::<TimestampMillisecondType>()
                .iter()
                .map(|v| {
                    v.and_then(DateTime::from_timestamp_millis)
                        .map(|dt| dt.naive_utc())
                })
                .collect())
        }
        DataType::Null => Ok(vec![None; col.len()]),
        _ => Err(unsupported(col, column)),
    }
}

/// Coerce a numeric (or numeric-looking string) column to optional floats.
fn number_column(col: &ArrayRef, column: &str) -> Result<Vec<Option<f64>>> {
    match col.data_type() {
        DataType::Utf8 => Ok(col
            .as_string::<i32>()
            .iter()
            .map(|v| v.and_then(parse_number))
            .collect()),
        DataType::LargeUtf8 => Ok(col
            .as_string::<i64>()
            .iter()
            .map(|v| v.and_then(parse_number))
            .collect()),
        dt if dt.is_numeric() => {
            let floats = cast(col, &DataType::Float64)?;
            Ok(floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| v.filter(|f| !f.is_nan()))
                .collect())
        }
        DataType::Null => Ok(vec![None; col.len()]),
        _ => Err(unsupported(col, column)),
    }
}
