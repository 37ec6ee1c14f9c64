use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::Screen;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CareerLensApp {
    pub screen: Screen,
}

impl CareerLensApp {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

impl eframe::App for CareerLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.screen {
            Screen::Dashboard(state) => state,
            Screen::LoadFailed(err) => {
                // No partial rendering when the dataset is unavailable.
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(format!("Failed to load employee data.\n\n{err}"))
                                .color(Color32::RED)
                                .size(18.0),
                        );
                    });
                });
                return;
            }
        };

        // ---- Top panel: title + department selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: multi-select filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                charts::metrics_row(ui, state);
                ui.separator();

                ui.columns(2, |cols| {
                    charts::cluster_pie(&mut cols[0], state);
                    charts::risk_bars(&mut cols[1], state);
                });
                ui.separator();

                charts::score_histogram(ui, state);
                ui.separator();
                charts::manager_scatter(ui, state);
                ui.separator();
                table::high_risk_table(ui, state);
            });
        });
    }
}
