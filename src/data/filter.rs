use super::model::QuakeDataset;

// ---------------------------------------------------------------------------
// Magnitude threshold filter
// ---------------------------------------------------------------------------

/// Return indices, in row order, of records whose magnitude is at least
/// `min_magnitude`.
///
/// A record with a null magnitude never passes, whatever the threshold.
pub fn filtered_indices(dataset: &QuakeDataset, min_magnitude: f64) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.magnitude.is_some_and(|m| m >= min_magnitude))
        .map(|(i, _)| i)
        .collect()
}
