use eframe::egui::{self, Ui};

pub mod panels;
pub mod plot;
pub mod tables;

/// A framed, shadowed container for one chart or table.
pub fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .shadow(ui.visuals().popup_shadow)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.strong(title);
            ui.separator();
            add_contents(ui);
        });
}
