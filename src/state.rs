use std::sync::Arc;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::charts::histogram::{BinCount, BinCountError, Histogram};
use crate::charts::scatter::ScatterPlot;
use crate::charts::table::{RowTable, grid_batch};
use crate::color::SpeciesPalette;
use crate::config::Settings;
use crate::data::filter::SpeciesFilter;
use crate::data::model::{Attribute, Dataset, Species};
use crate::data::view::DerivedView;

// ---------------------------------------------------------------------------
// Chart parameters
// ---------------------------------------------------------------------------

/// Values of the sidebar controls that only affect rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    /// Histogram attribute and scatter x axis.
    pub attribute: Attribute,
    pub scatter_y: Attribute,
    /// Raw value of the unbounded numeric input, validated on render.
    pub stacked_bins: i64,
    /// Slider value, always within the slider range.
    pub layered_bins: u32,
}

impl Controls {
    pub fn from_settings(settings: &Settings, continuous: &[Attribute]) -> Self {
        let layered = BinCount::clamped(settings.layered_bins);
        if i64::from(layered.get()) != settings.layered_bins {
            log::warn!(
                "layered_bins {} out of range, clamped to {}",
                settings.layered_bins,
                layered.get()
            );
        }
        Controls {
            attribute: settings.attribute,
            scatter_y: settings
                .scatter_y
                .or_else(|| continuous.last().copied())
                .unwrap_or(Attribute::BodyMassG),
            stacked_bins: settings.stacked_bins,
            layered_bins: layered.get(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The per-session UI state, independent of rendering. The dataset is
/// shared; the filter and the controls belong to this session only.
pub struct AppState {
    pub controls: Controls,
    pub palette: SpeciesPalette,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
    view: DerivedView,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, settings: &Settings) -> Self {
        let controls = Controls::from_settings(settings, dataset.continuous_columns());
        let filter: SpeciesFilter = settings.species.iter().copied().collect();
        Self {
            controls,
            palette: SpeciesPalette::default(),
            status_message: None,
            view: DerivedView::new(dataset, filter),
        }
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn filter(&self) -> &SpeciesFilter {
        self.view.filter()
    }

    /// Apply a new species selection coming from the UI.
    pub fn set_filter(&mut self, filter: SpeciesFilter) {
        if self.view.set_filter(filter) {
            log::debug!("Species selection changed to {:?}", self.view.filter());
        }
    }

    /// Toggle a single species in the selection.
    pub fn toggle_species(&mut self, species: Species) {
        let next = self.view.filter().toggled(species);
        self.set_filter(next);
    }

    /// Select every species.
    pub fn select_all(&mut self) {
        self.set_filter(SpeciesFilter::all());
    }

    /// Deselect every species.
    pub fn select_none(&mut self) {
        self.set_filter(SpeciesFilter::none());
    }

    // -- Presentation bindings --

    pub fn row_table(&self) -> RowTable {
        RowTable::compute(self.view.rows())
    }

    pub fn grid(&self) -> Result<RecordBatch, ArrowError> {
        grid_batch(self.view.rows())
    }

    /// Histogram for the unbounded bin input; invalid counts are rejected.
    pub fn stacked_histogram(&self) -> Result<Histogram, BinCountError> {
        let bins = BinCount::checked(self.controls.stacked_bins)?;
        Ok(Histogram::compute(self.view.rows(), self.controls.attribute, bins))
    }

    pub fn layered_histogram(&self) -> Histogram {
        let bins = BinCount::clamped(i64::from(self.controls.layered_bins));
        Histogram::compute(self.view.rows(), self.controls.attribute, bins)
    }

    pub fn scatter(&self) -> ScatterPlot {
        ScatterPlot::compute(
            self.view.rows(),
            self.controls.attribute,
            self.controls.scatter_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;

    fn state() -> AppState {
        AppState::new(loader::bundled().unwrap(), &Settings::default())
    }

    #[test]
    fn defaults_follow_settings() {
        let s = state();
        assert_eq!(s.controls.attribute, Attribute::BillLengthMm);
        assert_eq!(s.controls.scatter_y, Attribute::BodyMassG);
        assert_eq!(s.controls.stacked_bins, 50);
        assert_eq!(s.controls.layered_bins, 50);
        assert_eq!(s.filter(), &SpeciesFilter::all());
        assert_eq!(s.status_message, None);
        assert_eq!(s.view().rows().len(), s.view().dataset().len());
    }

    #[test]
    fn out_of_range_layered_bins_are_clamped() {
        let settings = Settings {
            layered_bins: 5,
            ..Settings::default()
        };
        let s = AppState::new(loader::bundled().unwrap(), &settings);
        assert_eq!(s.controls.layered_bins, 10);
        assert_eq!(s.layered_histogram().bin_count(), 10);
    }

    #[test]
    fn zero_stacked_bins_is_rejected_without_affecting_other_charts() {
        let mut s = state();
        s.controls.stacked_bins = 0;
        assert_eq!(s.stacked_histogram(), Err(BinCountError::NotPositive(0)));
        assert!(!s.layered_histogram().is_empty());
        assert!(!s.scatter().is_empty());
    }

    #[test]
    fn chart_parameters_do_not_refilter() {
        let mut s = state();
        let before = s.view().indices().to_vec();
        assert_eq!(s.view().recomputations(), 1);

        s.controls.stacked_bins = 10;
        s.stacked_histogram().unwrap();
        s.controls.layered_bins = 200;
        s.layered_histogram();
        s.controls.attribute = Attribute::BodyMassG;
        s.controls.scatter_y = Attribute::BillDepthMm;
        s.scatter();
        s.row_table();
        s.grid().unwrap();

        assert_eq!(s.view().recomputations(), 1);
        assert_eq!(s.view().indices(), before.as_slice());
    }

    #[test]
    fn species_changes_refilter_before_next_read() {
        let mut s = state();
        s.row_table();
        s.select_none();
        assert!(s.row_table().is_empty());
        assert!(s.stacked_histogram().unwrap().is_empty());

        s.toggle_species(Species::Gentoo);
        let table = s.row_table();
        assert_eq!(table.rows.len(), s.view().dataset().count_species(Species::Gentoo));
        assert_eq!(s.view().recomputations(), 3);

        s.select_all();
        assert_eq!(s.grid().unwrap().num_rows(), s.view().dataset().len());
    }

    #[test]
    fn body_mass_histogram_counts_every_observation() {
        let mut s = state();
        s.controls.attribute = Attribute::BodyMassG;
        s.controls.stacked_bins = 50;
        let hist = s.stacked_histogram().unwrap();
        let expected = s.view().rows().iter().filter(|r| r.body_mass_g.is_some()).count();
        assert_eq!(hist.total(), expected);
    }
}
