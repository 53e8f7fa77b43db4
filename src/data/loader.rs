use std::sync::Arc;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;

use super::model::{COLUMNS, Dataset, Record};

/// The penguins table shipped inside the binary. It follows the
/// palmerpenguins schema and `NA` layout, but its measurements are a
/// generated sample, not the published observations.
const BUNDLED_CSV: &str = include_str!("../../assets/penguins.csv");

/// Shown wherever the bundled data is named to the user.
pub const BUNDLED_LABEL: &str = "synthetic sample (palmerpenguins schema)";

static BUNDLED: OnceCell<Arc<Dataset>> = OnceCell::new();

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Return the bundled dataset, parsing it on first access only.
///
/// Every later call hands out the same shared `Arc` without touching the
/// embedded source again.
pub fn bundled() -> Result<Arc<Dataset>> {
    BUNDLED
        .get_or_try_init(|| {
            let dataset = parse_csv(BUNDLED_CSV).context("parsing bundled penguins table")?;
            if dataset.is_empty() {
                bail!("bundled penguins table has no records");
            }
            log::info!(
                "Loaded {} records ({BUNDLED_LABEL}) with columns {:?}",
                dataset.len(),
                COLUMNS
            );
            Ok(Arc::new(dataset))
        })
        .cloned()
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the palmerpenguins columns, `NA` or an empty
/// cell for missing measurements and sex. Column order does not matter, but
/// every expected column must be present.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}
