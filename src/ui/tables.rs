use eframe::egui::{self, Align, Color32, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::charts::table::{grid_cell_display, grid_text};
use crate::state::AppState;

const DATA_TABLE_HEIGHT: f32 = 185.0;
const DATA_GRID_HEIGHT: f32 = 260.0;

/// Row-oriented table of the filtered records.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let table = state.row_table();
    if table.is_empty() {
        ui.weak("No rows for the current selection.");
    }
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0), table.columns.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(DATA_TABLE_HEIGHT)
            .header(20.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui| {
                        ui.strong(*col);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, table.rows.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Columnar grid backed by an Arrow batch, with a copy-as-text action.
pub fn data_grid(ui: &mut Ui, state: &AppState) {
    let batch = match state.grid() {
        Ok(batch) => batch,
        Err(e) => {
            log::error!("Failed to build data grid: {e}");
            ui.colored_label(Color32::RED, format!("Cannot build grid: {e}"));
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} rows", batch.num_rows()));
        if ui.small_button("Copy").clicked() {
            match grid_text(&batch) {
                Ok(text) => ui.ctx().copy_text(text),
                Err(e) => log::error!("Failed to format grid: {e}"),
            }
        }
    });

    let schema = batch.schema();
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

    ui.push_id("data_grid", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::initial(40.0).at_least(30.0))
            .columns(
                Column::initial(110.0).at_least(60.0).clip(true),
                batch.num_columns(),
            )
            .min_scrolled_height(0.0)
            .max_scroll_height(DATA_GRID_HEIGHT)
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for field in schema.fields() {
                    header.col(|ui| {
                        ui.strong(field.name());
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, batch.num_rows(), |mut row| {
                    let row_index = row.index();
                    row.col(|ui| {
                        ui.label(row_index.to_string());
                    });
                    for col in 0..batch.num_columns() {
                        row.col(|ui| {
                            ui.label(grid_cell_display(&batch, row_index, col));
                        });
                    }
                });
            });
    });
}
