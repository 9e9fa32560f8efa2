use std::fmt;

// ---------------------------------------------------------------------------
// Depth buckets
// ---------------------------------------------------------------------------

/// Fixed depth categories used for the binned averages.
///
/// Intervals are closed on the right, with the lowest edge included:
/// `[0, 50]`, `(50, 100]`, `(100, 200]`, `(200, 500]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthBucket {
    Shallow,
    Intermediate,
    Deep,
    VeryDeep,
}

/// Bucket edges in kilometres.
pub const DEPTH_EDGES_KM: [f64; 5] = [0.0, 50.0, 100.0, 200.0, 500.0];

impl DepthBucket {
    /// All buckets in definition order.
    pub const ALL: [DepthBucket; 4] = [
        DepthBucket::Shallow,
        DepthBucket::Intermediate,
        DepthBucket::Deep,
        DepthBucket::VeryDeep,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DepthBucket::Shallow => "<50 km",
            DepthBucket::Intermediate => "50-100 km",
            DepthBucket::Deep => "100-200 km",
            DepthBucket::VeryDeep => ">200 km",
        }
    }

    /// Position in definition order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower and upper edge of the bucket, in km.
    pub fn edges(self) -> (f64, f64) {
        let i = self.index();
        (DEPTH_EDGES_KM[i], DEPTH_EDGES_KM[i + 1])
    }

    /// Bucket containing `depth_km`, or `None` when the depth is missing or
    /// lies outside `[0, 500]`.
    pub fn classify(depth_km: Option<f64>) -> Option<DepthBucket> {
        let depth = depth_km?;
        if depth == DEPTH_EDGES_KM[0] {
            return Some(DepthBucket::Shallow);
        }
        DepthBucket::ALL.into_iter().find(|bucket| {
            let (lo, hi) = bucket.edges();
            depth > lo && depth <= hi
        })
    }
}

impl fmt::Display for DepthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_right_closed_intervals() {
        assert_eq!(DepthBucket::classify(Some(0.0)), Some(DepthBucket::Shallow));
        assert_eq!(DepthBucket::classify(Some(10.0)), Some(DepthBucket::Shallow));
        assert_eq!(DepthBucket::classify(Some(50.0)), Some(DepthBucket::Shallow));
        assert_eq!(DepthBucket::classify(Some(50.1)), Some(DepthBucket::Intermediate));
        assert_eq!(DepthBucket::classify(Some(75.0)), Some(DepthBucket::Intermediate));
        assert_eq!(DepthBucket::classify(Some(100.0)), Some(DepthBucket::Intermediate));
        assert_eq!(DepthBucket::classify(Some(150.0)), Some(DepthBucket::Deep));
        assert_eq!(DepthBucket::classify(Some(200.0)), Some(DepthBucket::Deep));
        assert_eq!(DepthBucket::classify(Some(200.5)), Some(DepthBucket::VeryDeep));
        assert_eq!(DepthBucket::classify(Some(500.0)), Some(DepthBucket::VeryDeep));
    }

    #[test]
    fn classify_rejects_out_of_range_and_missing() {
        assert_eq!(DepthBucket::classify(None), None);
        assert_eq!(DepthBucket::classify(Some(-0.5)), None);
        assert_eq!(DepthBucket::classify(Some(500.01)), None);
        assert_eq!(DepthBucket::classify(Some(520.0)), None);
        assert_eq!(DepthBucket::classify(Some(f64::NAN)), None);
    }

    #[test]
    fn buckets_are_disjoint_and_cover_the_range() {
        let mut depth = 0.0;
        while depth <= 500.0 {
            let hits = DepthBucket::ALL
                .iter()
                .filter(|b| {
                    let (lo, hi) = b.edges();
                    (depth > lo || (depth == 0.0 && b.index() == 0)) && depth <= hi
                })
                .count();
            assert_eq!(hits, 1, "depth {depth} matched {hits} buckets");
            assert!(DepthBucket::classify(Some(depth)).is_some());
            depth += 2.5;
        }
    }

    #[test]
    fn labels_follow_definition_order() {
        let labels: Vec<_> = DepthBucket::ALL.iter().map(|b| b.to_string()).collect();
        assert_eq!(labels, ["<50 km", "50-100 km", "100-200 km", ">200 km"]);
    }
}
