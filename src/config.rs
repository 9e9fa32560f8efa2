use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Tunable display settings. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Data file read at start-up when none is given on the command line.
    pub data_path: PathBuf,
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
    /// Initial magnitude threshold.
    pub default_threshold: f64,
    /// Markers at or above this magnitude are drawn as strong.
    pub strong_magnitude: f64,
    /// Marker radius in points per unit of magnitude.
    pub marker_radius_scale: f64,
    /// Initial map centre as `[latitude, longitude]`.
    pub map_center: [f64; 2],
    /// Initial map extent as `[latitude span, longitude span]` in degrees.
    pub map_span_degrees: [f64; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("laporan_data_gempa.xlsx"),
            slider_min: 0.0,
            slider_max: 10.0,
            slider_step: 0.1,
            default_threshold: 3.0,
            strong_magnitude: 5.0,
            marker_radius_scale: 1.8,
            map_center: [-2.0, 118.0],
            map_span_degrees: [24.0, 50.0],
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.slider_min < self.slider_max) {
            bail!(
                "slider_min ({}) must be below slider_max ({})",
                self.slider_min,
                self.slider_max
            );
        }
        if !(self.slider_step > 0.0) {
            bail!("slider_step must be positive, got {}", self.slider_step);
        }
        if !(self.slider_min..=self.slider_max).contains(&self.default_threshold) {
            bail!(
                "default_threshold {} is outside the slider range [{}, {}]",
                self.default_threshold,
                self.slider_min,
                self.slider_max
            );
        }
        if !(self.marker_radius_scale > 0.0) {
            bail!(
                "marker_radius_scale must be positive, got {}",
                self.marker_radius_scale
            );
        }
        if self.map_span_degrees.iter().any(|span| !(*span > 0.0)) {
            bail!("map_span_degrees must be positive, got {:?}", self.map_span_degrees);
        }
        Ok(())
    }

    /// Clamp a requested threshold into the slider range.
    pub fn clamp_threshold(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default_threshold;
        }
        value.clamp(self.slider_min, self.slider_max)
    }
}
