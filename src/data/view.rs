use std::cell::Cell;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use super::filter::{SpeciesFilter, filtered_indices};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// DerivedView – memoized filtered rows
// ---------------------------------------------------------------------------

/// The rows of the dataset passing the current [`SpeciesFilter`].
///
/// The matching indices are computed lazily on first read and cached until
/// the filter changes. Nothing but [`DerivedView::set_filter`] invalidates
/// the cache, so chart parameters can change freely without refiltering.
#[derive(Debug)]
pub struct DerivedView {
    dataset: Arc<Dataset>,
    filter: SpeciesFilter,
    cache: OnceCell<Vec<usize>>,
    recomputations: Cell<usize>,
}

impl DerivedView {
    pub fn new(dataset: Arc<Dataset>, filter: SpeciesFilter) -> Self {
        Self {
            dataset,
            filter,
            cache: OnceCell::new(),
            recomputations: Cell::new(0),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &SpeciesFilter {
        &self.filter
    }

    /// Replace the filter. Returns `true` when the selection actually changed
    /// (and the cached rows were dropped).
    pub fn set_filter(&mut self, filter: SpeciesFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.cache = OnceCell::new();
        true
    }

    /// Matching row indices, recomputed only after a filter change.
    pub fn indices(&self) -> &[usize] {
        self.cache.get_or_init(|| {
            self.recomputations.set(self.recomputations.get() + 1);
            let indices = filtered_indices(&self.dataset, &self.filter);
            log::debug!(
                "Refiltered {} of {} records for {:?}",
                indices.len(),
                self.dataset.len(),
                self.filter
            );
            indices
        })
    }

    /// Borrowed snapshot of the current rows for the presentation bindings.
    pub fn rows(&self) -> ViewRows<'_> {
        ViewRows {
            dataset: &self.dataset,
            indices: self.indices(),
        }
    }

    /// How many times the row set has been computed.
    #[cfg(test)]
    pub fn recomputations(&self) -> usize {
        self.recomputations.get()
    }
}

/// Read-only, order-preserving projection of the dataset.
#[derive(Debug, Clone, Copy)]
pub struct ViewRows<'a> {
    dataset: &'a Dataset,
    indices: &'a [usize],
}

impl<'a> ViewRows<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + 'a {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}
