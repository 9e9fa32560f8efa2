use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Cell;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – display settings
// ---------------------------------------------------------------------------

/// Render the settings panel: magnitude slider and dataset summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display settings");
    ui.separator();

    let mut threshold = state.threshold;
    let slider = egui::Slider::new(
        &mut threshold,
        state.config.slider_min..=state.config.slider_max,
    )
    .step_by(state.config.slider_step)
    .fixed_decimals(1)
    .text("Minimum magnitude");
    if ui.add(slider).changed() {
        state.set_threshold(threshold);
    }

    ui.separator();

    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Dataset");
    ui.label(format!("{} records", ds.len()));
    if let Some((lo, hi)) = ds.magnitude_range() {
        ui.label(format!("Magnitude {lo:.1} – {hi:.1}"));
    }
    if let Some((first, last)) = ds.time_span() {
        ui.label(format!(
            "{} → {}",
            Cell(&Some(first)),
            Cell(&Some(last))
        ));
    }

    let nulls = ds.null_counts();
    if nulls.any() {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "Unreadable cells: {} dates, {} depths, {} magnitudes",
                nulls.timestamp, nulls.depth, nulls.magnitude
            ))
            .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.view.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open earthquake data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xls", "xlsb", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "xlsb", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Failures are logged and surfaced through `status_message`.
        let _ = state.load(&path);
    }
}
