use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::charts::histogram::{BinCount, LAYERED_BINS_MAX, LAYERED_BINS_MIN};
use crate::config::Settings;
use crate::data::loader::BUNDLED_LABEL;
use crate::data::model::{Attribute, Species};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, settings: &Settings) {
    ui.heading("Controls");
    ui.separator();

    let continuous = state.view().dataset().continuous_columns();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            attribute_combo(
                ui,
                "selected_attribute",
                "Select attribute",
                &mut state.controls.attribute,
                continuous.iter().copied(),
            );
            ui.add_space(6.0);

            ui.strong("Stacked histogram bins");
            let response = ui.add(egui::DragValue::new(&mut state.controls.stacked_bins).speed(1.0));
            if response.changed() {
                if let Err(e) = BinCount::checked(state.controls.stacked_bins) {
                    log::warn!("Rejected stacked histogram bin count: {e}");
                }
            }
            ui.add_space(6.0);

            ui.strong("Layered histogram bins");
            ui.add(egui::Slider::new(
                &mut state.controls.layered_bins,
                LAYERED_BINS_MIN..=LAYERED_BINS_MAX,
            ));
            ui.add_space(6.0);

            species_checkboxes(ui, state);
            ui.add_space(6.0);

            // y-axis choices are offered last column first.
            attribute_combo(
                ui,
                "selected_attribute_y_scatter",
                "Scatterplot y-axis attribute",
                &mut state.controls.scatter_y,
                continuous.iter().rev().copied(),
            );

            if let Some(url) = &settings.source_url {
                ui.separator();
                ui.hyperlink_to("Source", url);
            }
        });
}

fn attribute_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: &mut Attribute,
    choices: impl Iterator<Item = Attribute>,
) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.column())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                ui.selectable_value(current, choice, choice.column());
            }
        });
}

/// Inline checkbox group plus All / None shortcuts.
fn species_checkboxes(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.filter().len();
    ui.strong(format!("Select species  ({n_selected}/{})", Species::ALL.len()));

    let mut toggled = Vec::new();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for species in Species::ALL {
            let mut checked = state.filter().contains(species);
            let count = state.view().dataset().count_species(species);
            let text = RichText::new(format!("{species} ({count})"))
                .color(state.palette.color_for(species));
            if ui.checkbox(&mut checked, text).changed() {
                toggled.push(species);
            }
        }
    });
    for species in toggled {
        state.toggle_species(species);
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with data source, row counts and status message.
pub fn top_bar(ui: &mut Ui, state: &AppState, settings: &Settings) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&settings.title);
        ui.weak(BUNDLED_LABEL);
        ui.separator();

        let view = state.view();
        let rows = view.rows();
        ui.label(format!(
            "{} records loaded, {} visible",
            view.dataset().len(),
            rows.len()
        ));
        if rows.is_empty() {
            ui.weak("(no species selected)");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
