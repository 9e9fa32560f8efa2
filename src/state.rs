use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::error::LoadError;
use crate::data::loader::load_file;
use crate::data::model::QuakeDataset;
use crate::data::view::{DashboardView, derive_view};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<QuakeDataset>,

    /// Current minimum magnitude, bound to the slider.
    pub threshold: f64,

    /// Chart projections for the current dataset and threshold (cached).
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let threshold = config.default_threshold;
        Self {
            config,
            dataset: None,
            threshold,
            view: DashboardView::default(),
            status_message: None,
        }
    }

    /// Load `path` and make it the current dataset. On failure the previous
    /// dataset is dropped so no stale dashboard is shown.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.view = DashboardView::default();
                self.status_message = Some(format!("Error: {}", error_chain(&e)));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset and derive its views.
    pub fn set_dataset(&mut self, dataset: QuakeDataset) {
        self.view = derive_view(&dataset, self.threshold, &self.config);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Move the threshold, recomputing the view only when it changed.
    pub fn set_threshold(&mut self, value: f64) {
        let value = self.config.clamp_threshold(value);
        if value == self.threshold {
            return;
        }
        self.threshold = value;
        self.refresh();
    }

    /// Recompute the view from the current dataset and threshold.
    pub fn refresh(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = derive_view(ds, self.threshold, &self.config);
        }
    }
}

/// `err: cause: cause` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};
    use std::io::Write;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset(vec![
            record(Some((2023, 1, 1)), Some(10.0), Some(4.0)),
            record(Some((2023, 1, 2)), Some(75.0), Some(5.5)),
            record(Some((2023, 1, 3)), Some(520.0), Some(2.0)),
        ]));
        state
    }

    #[test]
    fn new_state_starts_at_default_threshold() {
        let state = AppState::new(DashboardConfig::default());
        assert_eq!(state.threshold, 3.0);
        assert!(state.dataset.is_none());
        assert!(state.view.visible.is_empty());
    }

    #[test]
    fn set_dataset_derives_view_at_current_threshold() {
        let state = loaded_state();
        assert_eq!(state.view.visible, vec![0, 1]);
        assert_eq!(state.view.threshold, 3.0);
    }

    #[test]
    fn set_threshold_recomputes_and_clamps() {
        let mut state = loaded_state();
        state.set_threshold(1.0);
        assert_eq!(state.view.visible, vec![0, 1, 2]);

        state.set_threshold(42.0);
        assert_eq!(state.threshold, 10.0);
        assert!(state.view.visible.is_empty());
        assert_eq!(state.view.threshold, 10.0);
    }

    #[test]
    fn failed_load_clears_dashboard_and_reports() {
        let mut state = loaded_state();
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"only,three,columns\n1,2,3\n").unwrap();

        assert!(state.load(file.path()).is_err());
        assert!(state.dataset.is_none());
        assert!(state.view.visible.is_empty());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("expected 5 columns"));
    }

    #[test]
    fn successful_load_clears_previous_error() {
        let mut state = AppState::new(DashboardConfig::default());
        assert!(state.load(Path::new("/missing/quakes.csv")).is_err());
        assert!(state.status_message.is_some());

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"date,lat,lon,depth,mag\n2023-01-01,-2,118,10,4.5\n")
            .unwrap();
        state.load(file.path()).unwrap();
        assert!(state.status_message.is_none());
        assert_eq!(state.view.visible, vec![0]);
    }
}
