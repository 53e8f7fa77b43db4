use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::charts::histogram::Histogram;
use crate::color::SpeciesPalette;
use crate::data::model::Sex;
use crate::state::AppState;

const HISTOGRAM_HEIGHT: f32 = 260.0;
const SCATTER_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Species series stacked on top of each other.
pub fn stacked_histogram(ui: &mut Ui, state: &AppState) {
    match state.stacked_histogram() {
        Ok(hist) => histogram_plot(ui, "stacked_histogram", &hist, &state.palette, true),
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Cannot draw histogram: {e}"));
        }
    }
}

/// Species series overlaid as translucent layers.
pub fn layered_histogram(ui: &mut Ui, state: &AppState) {
    let hist = state.layered_histogram();
    histogram_plot(ui, "layered_histogram", &hist, &state.palette, false);
}

fn histogram_plot(ui: &mut Ui, id: &str, hist: &Histogram, palette: &SpeciesPalette, stacked: bool) {
    if hist.is_empty() {
        ui.weak("No observations for the current selection.");
    } else {
        ui.weak(format!("{} observations in {} bins", hist.total(), hist.bin_count()));
    }
    let width = hist.bin_width();

    let mut charts: Vec<BarChart> = Vec::with_capacity(hist.series.len());
    for series in &hist.series {
        let color = palette.color_for(series.species);
        let fill = if stacked { color } else { color.gamma_multiply(0.45) };
        let bars: Vec<Bar> = series
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(hist.bin_center(i), count as f64)
                    .width(width)
                    .fill(fill)
            })
            .collect();

        let chart = BarChart::new(bars).name(series.species.as_str()).color(color);
        let chart = if stacked {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart.stack_on(&below)
        } else {
            chart
        };
        charts.push(chart);
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(HISTOGRAM_HEIGHT)
        .x_axis_label(hist.attribute.column())
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatterplot
// ---------------------------------------------------------------------------

fn marker_for(sex: Option<Sex>) -> MarkerShape {
    match sex {
        Some(Sex::Male) => MarkerShape::Circle,
        Some(Sex::Female) => MarkerShape::Diamond,
        None => MarkerShape::Square,
    }
}

/// Colour by species, marker by sex, island on hover.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let scatter = state.scatter();
    let hover = scatter.clone();

    if scatter.is_empty() {
        ui.weak("No observations for the current selection.");
    } else {
        ui.weak(format!("{} points", scatter.point_count()));
    }

    Plot::new("scatter")
        .legend(Legend::default())
        .height(SCATTER_HEIGHT)
        .x_axis_label(scatter.x.column())
        .y_axis_label(scatter.y.column())
        .allow_scroll(false)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return String::new();
            }
            hover
                .hover_text(name, value.x, value.y)
                .unwrap_or_else(|| name.to_string())
        })
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(series.name())
                        .color(state.palette.color_for(series.species))
                        .shape(marker_for(series.sex))
                        .filled(true)
                        .radius(3.0),
                );
            }
        });
}
