use std::collections::BTreeSet;

use super::model::{Dataset, Species};

// ---------------------------------------------------------------------------
// Filter predicate: which species are selected
// ---------------------------------------------------------------------------

/// The set of currently selected species. An empty selection is valid and
/// matches no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesFilter {
    selected: BTreeSet<Species>,
}

impl Default for SpeciesFilter {
    /// Every species selected (i.e., show everything).
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Species> for SpeciesFilter {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        SpeciesFilter {
            selected: iter.into_iter().collect(),
        }
    }
}

impl SpeciesFilter {
    pub fn all() -> Self {
        Species::ALL.into_iter().collect()
    }

    pub fn none() -> Self {
        SpeciesFilter {
            selected: BTreeSet::new(),
        }
    }

    pub fn contains(&self, species: Species) -> bool {
        self.selected.contains(&species)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Return a copy with `species` flipped in or out of the selection.
    pub fn toggled(&self, species: Species) -> Self {
        let mut next = self.clone();
        if !next.selected.remove(&species) {
            next.selected.insert(species);
        }
        next
    }
}

/// Return indices of records whose species is selected, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filter: &SpeciesFilter) -> Vec<usize> {
    if filter.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.contains(r.species))
        .map(|(i, _)| i)
        .collect()
}
