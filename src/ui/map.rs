use eframe::egui::{self, RichText, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, Points};

use crate::color::{STRONG_COLOR, WEAK_COLOR, marker_color};
use crate::config::DashboardConfig;
use crate::data::view::DashboardView;

// ---------------------------------------------------------------------------
// Earthquake map (markers in longitude / latitude space)
// ---------------------------------------------------------------------------

/// Plot every visible quake as a circle at its epicentre. Hovering a marker
/// shows its date, magnitude and depth.
pub fn quake_map(ui: &mut Ui, view: &DashboardView, config: &DashboardConfig) {
    let [center_lat, center_lon] = config.map_center;
    let [lat_span, lon_span] = config.map_span_degrees;

    Plot::new("quake_map")
        .height(500.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(center_lon - lon_span / 2.0)
        .include_x(center_lon + lon_span / 2.0)
        .include_y(center_lat - lat_span / 2.0)
        .include_y(center_lat + lat_span / 2.0)
        .label_formatter(|name: &str, value: &PlotPoint| {
            if name.is_empty() {
                format!("{:.2}°, {:.2}°", value.y, value.x)
            } else {
                name.to_string()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for marker in &view.markers {
                plot_ui.points(
                    Points::new(vec![[marker.longitude, marker.latitude]])
                        .name(&marker.popup)
                        .color(marker_color(marker.strong).gamma_multiply(0.7))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker.radius),
                );
            }
        });

    legend(ui, config.strong_magnitude);
}

/// Static key for the two marker colours.
fn legend(ui: &mut Ui, strong_magnitude: f64) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Legend").strong());
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(STRONG_COLOR, "●");
            ui.label(format!("Magnitude ≥ {strong_magnitude} (strong)"));
        });
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(WEAK_COLOR, "●");
            ui.label(format!("Magnitude < {strong_magnitude} (weak)"));
        });
    });
}
