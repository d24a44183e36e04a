use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plate, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PlateTidyApp {
    pub state: AppState,
}

impl eframe::App for PlateTidyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu / status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: replicate-set controls ----
        egui::SidePanel::left("replicate_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plate map above the curve preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plate::plate_map(ui, &mut self.state);
            if self.state.table.is_some() {
                ui.separator();
                plot::growth_plot(ui, &self.state);
            }
        });
    }
}
