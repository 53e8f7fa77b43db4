use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::config::Settings;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{card, panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashApp {
    pub state: AppState,
    settings: Settings,
}

impl PenguinDashApp {
    pub fn new(dataset: Arc<Dataset>, settings: Settings, status: Option<String>) -> Self {
        let mut state = AppState::new(dataset, &settings);
        state.status_message = status;
        Self { state, settings }
    }
}

impl eframe::App for PenguinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.settings);
        });

        // ---- Left side panel: controls ----
        // Drawn before the central panel so a selection change is applied
        // before any chart reads the rows this frame.
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.settings);
            });

        // ---- Central panel: tables and charts ----
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Data table", |ui| tables::data_table(ui, state));
                        card(&mut cols[1], "Data grid", |ui| tables::data_grid(ui, state));
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Stacked histogram", |ui| {
                            plot::stacked_histogram(ui, state)
                        });
                        card(&mut cols[1], "Layered histogram", |ui| {
                            plot::layered_histogram(ui, state)
                        });
                    });
                    ui.add_space(8.0);

                    card(ui, "Scatterplot: Species", |ui| plot::scatter_plot(ui, state));
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;

    #[test]
    fn settings_fallback_status_reaches_the_top_bar_state() {
        let (settings, status) =
            Settings::resolve(Some(std::path::Path::new("/nonexistent/dash.json")));
        let app = PenguinDashApp::new(loader::bundled().unwrap(), settings, status);
        let message = app.state.status_message.as_deref().unwrap();
        assert!(message.starts_with("Settings not loaded"), "{message}");
    }

    #[test]
    fn no_status_without_settings_error() {
        let app = PenguinDashApp::new(loader::bundled().unwrap(), Settings::default(), None);
        assert!(app.state.status_message.is_none());
    }
}
