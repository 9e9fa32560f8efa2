use std::cmp::Ordering;

use super::bucket::DepthBucket;
use super::model::QuakeDataset;

// ---------------------------------------------------------------------------
// Group-by-bucket mean
// ---------------------------------------------------------------------------

/// Mean magnitude of the records in one depth bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketMean {
    pub bucket: DepthBucket,
    pub mean_magnitude: f64,
    /// Number of records averaged.
    pub count: usize,
}

/// Group the given records by depth bucket and average their magnitudes.
///
/// Output is in bucket definition order with empty buckets omitted. Records
/// with no bucket (null or out-of-range depth) or a null magnitude do not
/// contribute.
pub fn mean_magnitude_by_bucket(dataset: &QuakeDataset, indices: &[usize]) -> Vec<BucketMean> {
    let mut sums = [(0.0_f64, 0_usize); DepthBucket::ALL.len()];

    for &idx in indices {
        let record = &dataset.records[idx];
        let (Some(bucket), Some(magnitude)) =
            (DepthBucket::classify(record.depth_km), record.magnitude)
        else {
            continue;
        };
        let slot = &mut sums[bucket.index()];
        slot.0 += magnitude;
        slot.1 += 1;
    }

    DepthBucket::ALL
        .into_iter()
        .zip(sums)
        .filter(|(_, (_, count))| *count > 0)
        .map(|(bucket, (sum, count))| BucketMean {
            bucket,
            mean_magnitude: sum / count as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chronological ordering
// ---------------------------------------------------------------------------

/// Sort `indices` by record timestamp, ascending.
///
/// Undated records go last. The sort is stable, so ties (and the undated
/// tail) keep their row order.
pub fn chronological_order(dataset: &QuakeDataset, indices: &[usize]) -> Vec<usize> {
    let mut ordered = indices.to_vec();
    ordered.sort_by(|&a, &b| {
        match (dataset.records[a].timestamp, dataset.records[b].timestamp) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    ordered
}
