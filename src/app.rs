use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{map, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuakePanelApp {
    pub state: AppState,
}

impl QuakePanelApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for QuakePanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: threshold slider ----
        egui::SidePanel::left("settings_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the four charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.heading(RichText::new(msg).color(egui::Color32::RED));
            }
            None => {
                ui.heading("Open a file to view earthquakes  (File → Open…)");
            }
        });
        return;
    };

    if ds.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("{} contains no records", ds.source.display()));
        });
        return;
    }

    let view = &state.view;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Magnitude vs time");
            plot::scatter_plot(ui, view);
            ui.separator();

            ui.heading("Earthquake map");
            map::quake_map(ui, view, &state.config);
            ui.separator();

            ui.heading("Magnitude trend over time");
            plot::timeline_plot(ui, view);
            ui.separator();

            ui.heading("Mean magnitude by depth (binned)");
            plot::depth_bar_chart(ui, view);
            ui.separator();

            ui.label(RichText::new(format!("Data source: {}", ds.source.display())).weak());
        });
}
