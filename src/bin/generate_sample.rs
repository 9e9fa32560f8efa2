use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Exponential draw, for Gutenberg-Richter style magnitudes.
    fn exponential(&mut self, rate: f64) -> f64 {
        -(1.0 - self.next_f64()).ln() / rate
    }
}

/// Rough epicentre clusters along the Indonesian subduction zones:
/// (latitude, longitude, spread in degrees).
const SOURCES: [(f64, f64, f64); 5] = [
    (-2.0, 99.5, 2.0),
    (-8.5, 112.0, 2.5),
    (-8.3, 121.0, 2.0),
    (1.5, 126.5, 1.5),
    (-3.5, 130.0, 2.0),
];

const RECORDS: usize = 600;

fn main() {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2022, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut dates = Vec::with_capacity(RECORDS);
    let mut lats = Vec::with_capacity(RECORDS);
    let mut lons = Vec::with_capacity(RECORDS);
    let mut depths = Vec::with_capacity(RECORDS);
    let mut mags = Vec::with_capacity(RECORDS);

    for i in 0..RECORDS {
        let (lat, lon, spread) = SOURCES[(rng.next_u64() % SOURCES.len() as u64) as usize];
        let when = start + Duration::seconds((rng.uniform(0.0, 730.0) * 86_400.0) as i64);
        let depth = (rng.exponential(1.0 / 60.0)).min(650.0);
        let magnitude = (2.5 + rng.exponential(1.2)).min(8.5);

        // Sprinkle unreadable cells so the null handling shows up.
        dates.push(if i % 97 == 13 {
            "unknown".to_string()
        } else {
            when.format("%Y-%m-%d %H:%M:%S").to_string()
        });
        depths.push(if i % 89 == 7 {
            "-".to_string()
        } else {
            format!("{depth:.1}")
        });
        mags.push(if i % 151 == 42 {
            String::new()
        } else {
            format!("{magnitude:.1}")
        });
        lats.push(lat + rng.uniform(-spread, spread));
        lons.push(lon + rng.uniform(-spread, spread));
    }

    // CSV (spreadsheet export layout)
    let csv_path = "sample_quakes.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["date", "latitude", "longitude", "depth", "magnitude"])
        .expect("Failed to write CSV header");
    for i in 0..RECORDS {
        let lat = format!("{:.3}", lats[i]);
        let lon = format!("{:.3}", lons[i]);
        writer
            .write_record([dates[i].as_str(), lat.as_str(), lon.as_str(), depths[i].as_str(), mags[i].as_str()])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Parquet: typed coordinates, text cells for the coercible columns
    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("depth", DataType::Utf8, false),
        Field::new("magnitude", DataType::Utf8, false),
    ]));

    let as_strs = |v: &[String]| StringArray::from(v.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(as_strs(&dates)),
            Arc::new(Float64Array::from(lats)),
            Arc::new(Float64Array::from(lons)),
            Arc::new(as_strs(&depths)),
            Arc::new(as_strs(&mags)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample_quakes.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {RECORDS} earthquake records to {csv_path} and {parquet_path}");
}
