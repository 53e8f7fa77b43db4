use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray, UInt16Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::{Attribute, COLUMNS, Record};
use crate::data::view::ViewRows;

/// Text shown for missing cells.
pub const MISSING: &str = "NA";

// ---------------------------------------------------------------------------
// Row-oriented table
// ---------------------------------------------------------------------------

/// The view as display strings, one `Vec` per record.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl RowTable {
    pub fn compute(rows: ViewRows<'_>) -> Self {
        RowTable {
            columns: COLUMNS.to_vec(),
            rows: rows.iter().map(row_cells).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_cells(r: &Record) -> Vec<String> {
    let mut cells = Vec::with_capacity(COLUMNS.len());
    cells.push(r.species.to_string());
    cells.push(r.island.to_string());
    for attribute in Attribute::ALL {
        cells.push(
            r.value(attribute)
                .map(|v| v.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        );
    }
    cells.push(
        r.sex
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING.to_string()),
    );
    cells.push(r.year.to_string());
    cells
}

// ---------------------------------------------------------------------------
// Columnar grid
// ---------------------------------------------------------------------------

/// The view as an Arrow batch: one nullable array per column.
pub fn grid_batch(rows: ViewRows<'_>) -> Result<RecordBatch, ArrowError> {
    let mut fields = vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
    ];
    for attribute in Attribute::ALL {
        fields.push(Field::new(attribute.column(), DataType::Float64, true));
    }
    fields.push(Field::new("sex", DataType::Utf8, true));
    fields.push(Field::new("year", DataType::UInt16, false));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.species.as_str()))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.island.as_str()))),
    ];
    for attribute in Attribute::ALL {
        columns.push(Arc::new(Float64Array::from_iter(
            rows.iter().map(|r| r.value(attribute)),
        )));
    }
    columns.push(Arc::new(StringArray::from_iter(
        rows.iter().map(|r| r.sex.map(|s| s.as_str())),
    )));
    columns.push(Arc::new(UInt16Array::from_iter_values(rows.iter().map(|r| r.year))));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

/// Display string of one grid cell; nulls show as [`MISSING`].
pub fn grid_cell(batch: &RecordBatch, row: usize, col: usize) -> Result<String, ArrowError> {
    if col >= batch.num_columns() || row >= batch.num_rows() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "cell ({row}, {col}) outside {}x{} grid",
            batch.num_rows(),
            batch.num_columns()
        )));
    }
    let array = batch.column(col);
    if array.is_null(row) {
        return Ok(MISSING.to_string());
    }
    array_value_to_string(array.as_ref(), row)
}

/// Text shown in a grid cell that could not be formatted.
pub const UNFORMATTABLE: &str = "?";

/// Cell text for display; formatting errors are logged and replaced by
/// [`UNFORMATTABLE`].
pub fn grid_cell_display(batch: &RecordBatch, row: usize, col: usize) -> String {
    grid_cell(batch, row, col).unwrap_or_else(|e| {
        log::warn!("Failed to format grid cell ({row}, {col}): {e}");
        UNFORMATTABLE.to_string()
    })
}

/// Plain-text rendition of the grid for the clipboard.
pub fn grid_text(batch: &RecordBatch) -> Result<String, ArrowError> {
    Ok(pretty_format_batches(std::slice::from_ref(batch))?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::SpeciesFilter;
    use crate::data::loader;
    use crate::data::model::Species;
    use crate::data::view::DerivedView;

    #[test]
    fn row_table_matches_view() {
        let view = DerivedView::new(loader::bundled().unwrap(), [Species::Adelie].into_iter().collect());
        let table = RowTable::compute(view.rows());
        assert_eq!(table.rows.len(), view.rows().len());
        assert!(table.rows.iter().all(|r| r.len() == table.columns.len()));
        assert!(table.rows.iter().all(|r| r[0] == "Adelie"));
    }

    #[test]
    fn missing_cells_show_as_na() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::default());
        let table = RowTable::compute(view.rows());
        // Fourth bundled record has every measurement missing.
        assert_eq!(table.rows[3][2], MISSING);
        assert_eq!(table.rows[3][6], MISSING);
        assert_ne!(table.rows[0][2], MISSING);
    }

    #[test]
    fn grid_has_one_array_per_column() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::default());
        let batch = grid_batch(view.rows()).unwrap();
        assert_eq!(batch.num_rows(), view.rows().len());
        assert_eq!(batch.num_columns(), COLUMNS.len());
        assert_eq!(batch.schema().field(5).name(), "body_mass_g");

        let missing_mass = view.rows().iter().filter(|r| r.body_mass_g.is_none()).count();
        assert_eq!(batch.column(5).null_count(), missing_mass);
        assert_eq!(grid_cell(&batch, 3, 5).unwrap(), MISSING);
        assert_eq!(grid_cell(&batch, 0, 0).unwrap(), "Adelie");
    }

    #[test]
    fn empty_view_gives_empty_tables() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::none());
        assert!(RowTable::compute(view.rows()).is_empty());

        let batch = grid_batch(view.rows()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), COLUMNS.len());
        assert!(grid_text(&batch).unwrap().contains("species"));
    }

    #[test]
    fn cell_outside_grid_is_an_error_not_blank() {
        let view = DerivedView::new(loader::bundled().unwrap(), SpeciesFilter::all());
        let batch = grid_batch(view.rows()).unwrap();
        let rows = batch.num_rows();
        let cols = batch.num_columns();

        assert!(grid_cell(&batch, 0, cols).is_err());
        assert!(grid_cell(&batch, rows, 0).is_err());
        assert_eq!(grid_cell_display(&batch, rows, 0), UNFORMATTABLE);
        assert_eq!(grid_cell_display(&batch, 0, 0), grid_cell(&batch, 0, 0).unwrap());
    }
}
