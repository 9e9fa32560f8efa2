use std::ops::RangeInclusive;

use chrono::DateTime;
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::color::{INFERNO, MISSING_COLOR, STRONG_COLOR, TURBO, WEAK_COLOR};
use crate::data::view::DashboardView;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Format an epoch-seconds axis value as a calendar date.
fn date_tick(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    DateTime::from_timestamp(mark.value as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Hover label: the series name when the hovered item has one.
fn hover_label(name: &str, value: &PlotPoint) -> String {
    if name.is_empty() {
        format!("magnitude {:.1}", value.y)
    } else {
        name.to_string()
    }
}

// ---------------------------------------------------------------------------
// Magnitude vs time scatter
// ---------------------------------------------------------------------------

/// Scatter of magnitude over time, coloured by depth and sized by magnitude.
/// Undated records are drawn as diamonds at the left edge of the time axis.
pub fn scatter_plot(ui: &mut Ui, view: &DashboardView) {
    let depth_range = view.depth_range;
    let undated_x = view.time_range().map(|(lo, _)| lo).unwrap_or(0.0);

    Plot::new("magnitude_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Magnitude")
        .x_axis_formatter(date_tick)
        .label_formatter(hover_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for point in &view.scatter {
                let color = match (point.depth_km, depth_range) {
                    (Some(depth), Some(range)) => TURBO.map(depth, range),
                    _ => MISSING_COLOR,
                };
                let (x, shape) = match point.time {
                    Some(t) => (t, MarkerShape::Circle),
                    None => (undated_x, MarkerShape::Diamond),
                };

                plot_ui.points(
                    Points::new(vec![[x, point.magnitude]])
                        .name(&point.label)
                        .color(color)
                        .shape(shape)
                        .filled(true)
                        .radius((point.magnitude as f32).max(1.0) * 1.5),
                );
            }
        });

    if let Some((lo, hi)) = depth_range {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Depth colour:");
            ui.colored_label(TURBO.at(0.0), format!("● {lo:.0} km"));
            ui.colored_label(TURBO.at(0.5), "●");
            ui.colored_label(TURBO.at(1.0), format!("● {hi:.0} km"));
        });
    }
}

// ---------------------------------------------------------------------------
// Magnitude trend line
// ---------------------------------------------------------------------------

/// Magnitude over time, joined in chronological order.
pub fn timeline_plot(ui: &mut Ui, view: &DashboardView) {
    let points: Vec<[f64; 2]> = view
        .timeline
        .iter()
        .filter_map(|p| Some([p.time?, p.magnitude]))
        .collect();

    Plot::new("magnitude_timeline")
        .height(CHART_HEIGHT)
        .x_axis_label("Event date")
        .y_axis_label("Magnitude")
        .x_axis_formatter(date_tick)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("magnitude")
                    .color(STRONG_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(STRONG_COLOR)
                    .filled(true)
                    .radius(3.0),
            );
        });

    let undated = view.undated_count();
    if undated > 0 {
        ui.weak(format!("{undated} undated records not shown on the trend line"));
    }
}

// ---------------------------------------------------------------------------
// Mean magnitude per depth bucket
// ---------------------------------------------------------------------------

/// Bar chart of mean magnitude per non-empty depth bucket.
pub fn depth_bar_chart(ui: &mut Ui, view: &DashboardView) {
    let mean_range = view.mean_range();
    let labels: Vec<(usize, &'static str)> = view
        .depth_means
        .iter()
        .enumerate()
        .map(|(i, m)| (i, m.bucket.label()))
        .collect();

    let bars: Vec<Bar> = view
        .depth_means
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let fill = mean_range
                .map(|range| INFERNO.map(m.mean_magnitude, range))
                .unwrap_or(WEAK_COLOR);
            Bar::new(i as f64, m.mean_magnitude)
                .name(format!("{} ({} quakes)", m.bucket.label(), m.count))
                .fill(fill)
                .width(0.6)
        })
        .collect();

    Plot::new("depth_means")
        .height(CHART_HEIGHT)
        .x_axis_label("Depth category")
        .y_axis_label("Mean magnitude")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            labels
                .iter()
                .find(|(i, _)| (*i as f64 - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.to_string())
                .unwrap_or_default()
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("mean magnitude").element_formatter(
                Box::new(|bar: &Bar, _chart: &BarChart| format!("{}\nmean {:.2}", bar.name, bar.value)),
            ));
        });
}
