use thiserror::Error;

use crate::data::model::{Attribute, Species};
use crate::data::view::ViewRows;

// ---------------------------------------------------------------------------
// Bin count policy
// ---------------------------------------------------------------------------

/// Bounds of the layered histogram's slider.
pub const LAYERED_BINS_MIN: u32 = 10;
pub const LAYERED_BINS_MAX: u32 = 344;

/// Upper limit accepted from the unbounded numeric input.
pub const MAX_BINS: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinCountError {
    #[error("bin count must be at least 1 (got {0})")]
    NotPositive(i64),
    #[error("bin count must be at most {max} (got {0})", max = MAX_BINS)]
    TooLarge(i64),
}

/// A validated, strictly positive number of bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinCount(u32);

impl BinCount {
    /// Validate a raw value from the unbounded input. Degenerate values are
    /// rejected rather than clamped.
    pub fn checked(raw: i64) -> Result<Self, BinCountError> {
        if raw < 1 {
            return Err(BinCountError::NotPositive(raw));
        }
        if raw > MAX_BINS {
            return Err(BinCountError::TooLarge(raw));
        }
        Ok(BinCount(raw as u32))
    }

    /// Clamp a raw value into the layered histogram's slider range.
    pub fn clamped(raw: i64) -> Self {
        let clamped = raw.clamp(LAYERED_BINS_MIN as i64, LAYERED_BINS_MAX as i64);
        BinCount(clamped as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Histogram artifact
// ---------------------------------------------------------------------------

/// Per-species counts, one entry per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCounts {
    pub species: Species,
    pub counts: Vec<usize>,
}

/// Equal-width binned distribution of one attribute, grouped by species.
///
/// All series share the same `edges`; an empty view (or an attribute with no
/// observed values) produces a histogram with no edges and no series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub attribute: Attribute,
    pub edges: Vec<f64>,
    pub series: Vec<SpeciesCounts>,
}

impl Histogram {
    pub fn compute(rows: ViewRows<'_>, attribute: Attribute, bins: BinCount) -> Self {
        let values: Vec<(Species, f64)> = rows
            .iter()
            .filter_map(|r| r.value(attribute).map(|v| (r.species, v)))
            .collect();

        if values.is_empty() {
            return Histogram {
                attribute,
                edges: Vec::new(),
                series: Vec::new(),
            };
        }

        let n_bins = bins.get() as usize;
        let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (hi - lo) / n_bins as f64;

        let edges: Vec<f64> = (0..=n_bins).map(|i| lo + width * i as f64).collect();

        let mut series: Vec<SpeciesCounts> = Species::ALL
            .into_iter()
            .filter(|s| values.iter().any(|(sp, _)| sp == s))
            .map(|species| SpeciesCounts {
                species,
                counts: vec![0; n_bins],
            })
            .collect();

        for (species, v) in &values {
            // Last bin is closed on the right.
            let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
            if let Some(s) = series.iter_mut().find(|s| s.species == *species) {
                s.counts[idx] += 1;
            }
        }

        Histogram {
            attribute,
            edges,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Centre of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    /// Observations counted across every bin and series.
    pub fn total(&self) -> usize {
        self.series.iter().flat_map(|s| s.counts.iter()).sum()
    }
}
