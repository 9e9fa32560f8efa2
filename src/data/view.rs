use crate::config::DashboardConfig;

use super::aggregate::{BucketMean, chronological_order, mean_magnitude_by_bucket};
use super::filter::filtered_indices;
use super::model::{Cell, QuakeDataset, min_max};

// ---------------------------------------------------------------------------
// View-ready projections
// ---------------------------------------------------------------------------

/// One point of the magnitude-vs-time scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Seconds since the Unix epoch, `None` for undated records.
    pub time: Option<f64>,
    pub magnitude: f64,
    pub depth_km: Option<f64>,
    /// Hover text.
    pub label: String,
}

/// One circle on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in screen points.
    pub radius: f32,
    pub strong: bool,
    pub popup: String,
}

/// One point of the magnitude trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelinePoint {
    pub time: Option<f64>,
    pub magnitude: f64,
}

/// Everything the four charts draw for one threshold value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub threshold: f64,
    /// Indices of the records passing the threshold, in row order.
    pub visible: Vec<usize>,
    pub scatter: Vec<ScatterPoint>,
    /// Depth extent of the visible records, for the scatter colour scale.
    pub depth_range: Option<(f64, f64)>,
    pub markers: Vec<MapMarker>,
    /// Chronological, undated records last.
    pub timeline: Vec<TimelinePoint>,
    pub depth_means: Vec<BucketMean>,
}

impl DashboardView {
    /// Time extent of the dated scatter points.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        min_max(self.scatter.iter().filter_map(|p| p.time))
    }

    /// Range of the reported bucket means, for the bar colour scale.
    pub fn mean_range(&self) -> Option<(f64, f64)> {
        min_max(self.depth_means.iter().map(|m| m.mean_magnitude))
    }

    pub fn undated_count(&self) -> usize {
        self.scatter.iter().filter(|p| p.time.is_none()).count()
    }
}

/// Filter the dataset at `threshold` and build every chart projection.
///
/// Pure: the same dataset and threshold always give the same view.
pub fn derive_view(dataset: &QuakeDataset, threshold: f64, config: &DashboardConfig) -> DashboardView {
    let visible = filtered_indices(dataset, threshold);

    let mut scatter = Vec::with_capacity(visible.len());
    let mut markers = Vec::with_capacity(visible.len());

    for &idx in &visible {
        let record = &dataset.records[idx];
        // Visible records always carry a magnitude.
        let Some(magnitude) = record.magnitude else {
            continue;
        };

        let popup = format!(
            "Date: {}\nMagnitude: {magnitude}\nDepth: {} km",
            Cell(&record.timestamp),
            Cell(&record.depth_km)
        );

        scatter.push(ScatterPoint {
            time: record.time_seconds(),
            magnitude,
            depth_km: record.depth_km,
            label: popup.clone(),
        });

        markers.push(MapMarker {
            latitude: record.latitude,
            longitude: record.longitude,
            radius: (magnitude * config.marker_radius_scale) as f32,
            strong: magnitude >= config.strong_magnitude,
            popup,
        });
    }

    let timeline = chronological_order(dataset, &visible)
        .into_iter()
        .filter_map(|idx| {
            let record = &dataset.records[idx];
            Some(TimelinePoint {
                time: record.time_seconds(),
                magnitude: record.magnitude?,
            })
        })
        .collect();

    let depth_range = min_max(scatter.iter().filter_map(|p| p.depth_km));
    let depth_means = mean_magnitude_by_bucket(dataset, &visible);

    log::debug!(
        "threshold {threshold:.1}: {} of {} records visible, {} depth buckets",
        visible.len(),
        dataset.len(),
        depth_means.len()
    );

    DashboardView {
        threshold,
        visible,
        scatter,
        depth_range,
        markers,
        timeline,
        depth_means,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bucket::DepthBucket;
    use crate::data::model::tests::{dataset, record};

    #[test]
    fn three_row_scenario_projects_every_chart() {
        let ds = dataset(vec![
            record(Some((2023, 1, 2)), Some(10.0), Some(4.0)),
            record(Some((2023, 1, 1)), Some(75.0), Some(5.5)),
            record(Some((2023, 1, 3)), Some(520.0), Some(2.0)),
        ]);
        let view = derive_view(&ds, 3.0, &DashboardConfig::default());

        assert_eq!(view.visible, vec![0, 1]);
        assert_eq!(view.scatter.len(), 2);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.depth_range, Some((10.0, 75.0)));

        assert!(!view.markers[0].strong);
        assert!(view.markers[1].strong);
        assert!((view.markers[0].radius - 7.2).abs() < 1e-5);
        assert!(view.markers[1].popup.contains("Magnitude: 5.5"));
        assert!(view.markers[1].popup.contains("Depth: 75 km"));

        let mags: Vec<f64> = view.timeline.iter().map(|p| p.magnitude).collect();
        assert_eq!(mags, vec![5.5, 4.0]);

        let buckets: Vec<_> = view.depth_means.iter().map(|m| m.bucket).collect();
        assert_eq!(buckets, vec![DepthBucket::Shallow, DepthBucket::Intermediate]);
    }

    #[test]
    fn undated_record_stays_on_scatter_and_map() {
        let ds = dataset(vec![
            record(None, Some(20.0), Some(6.0)),
            record(Some((2022, 6, 1)), Some(30.0), Some(4.0)),
        ]);
        let view = derive_view(&ds, 3.0, &DashboardConfig::default());

        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.undated_count(), 1);
        assert!(view.markers[0].popup.contains("Date: <unknown>"));
        assert_eq!(view.timeline.last().unwrap().time, None);
        assert_eq!(view.timeline.first().unwrap().magnitude, 4.0);
    }

    #[test]
    fn null_depth_is_plotted_but_not_bucketed() {
        let ds = dataset(vec![
            record(Some((2022, 6, 1)), None, Some(4.0)),
            record(Some((2022, 6, 2)), Some(120.0), Some(6.0)),
        ]);
        let view = derive_view(&ds, 0.0, &DashboardConfig::default());

        assert_eq!(view.scatter.len(), 2);
        assert_eq!(view.depth_range, Some((120.0, 120.0)));
        assert_eq!(view.depth_means.len(), 1);
        assert_eq!(view.depth_means[0].bucket, DepthBucket::Deep);
        assert_eq!(view.mean_range(), Some((6.0, 6.0)));
    }

    #[test]
    fn threshold_above_everything_gives_empty_view() {
        let ds = dataset(vec![record(Some((2022, 6, 1)), Some(10.0), Some(4.0))]);
        let view = derive_view(&ds, 9.0, &DashboardConfig::default());
        assert!(view.visible.is_empty());
        assert!(view.scatter.is_empty());
        assert!(view.timeline.is_empty());
        assert!(view.depth_means.is_empty());
        assert_eq!(view.depth_range, None);
        assert_eq!(view.time_range(), None);
    }

    #[test]
    fn small_magnitudes_scale_radius_without_a_floor() {
        let ds = dataset(vec![record(Some((2022, 6, 1)), Some(10.0), Some(0.3))]);
        let view = derive_view(&ds, 0.0, &DashboardConfig::default());
        assert!((view.markers[0].radius - 0.54).abs() < 1e-5);
    }
}
