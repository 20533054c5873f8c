//! Wide-to-long reshaping.

use polars::prelude::*;
use tracing::{debug, warn};

use estat_model::YEAR_COLUMN;
pub use estat_model::RAW_VALUE_COLUMN;

use crate::error::Result;
use crate::split::DimensionTable;

/// Unpivots every period column into `(year, value)` rows.
///
/// Each `(row, period column)` pair yields one row carrying the row's
/// dimensions, the verbatim period label and the raw cell. Rows come out in
/// original row order, then period column order. All columns stay strings;
/// missing cells stay null.
pub fn unpivot_years(table: &DimensionTable) -> Result<DataFrame> {
    let df = &table.frame;
    let height = df.height();
    let periods = table.year_columns.len();
    let expanded = height * periods;

    if periods == 0 {
        warn!(rows = height, "table has no period columns");
    }

    let dimension_cas = table
        .dimensions
        .iter()
        .map(|name| df.column(name).and_then(|column| column.str()))
        .collect::<PolarsResult<Vec<_>>>()?;
    let value_cas = table
        .year_columns
        .iter()
        .map(|name| df.column(name).and_then(|column| column.str()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut dimension_values: Vec<Vec<Option<&str>>> =
        vec![Vec::with_capacity(expanded); table.dimensions.len()];
    let mut years: Vec<&str> = Vec::with_capacity(expanded);
    let mut values: Vec<Option<&str>> = Vec::with_capacity(expanded);

    for row in 0..height {
        for (label, cells) in table.year_columns.iter().zip(&value_cas) {
            for (out, ca) in dimension_values.iter_mut().zip(&dimension_cas) {
                out.push(ca.get(row));
            }
            years.push(label.as_str());
            values.push(cells.get(row));
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(table.dimensions.len() + 2);
    for (name, data) in table.dimensions.iter().zip(dimension_values) {
        columns.push(Series::new(name.as_str().into(), data).into());
    }
    columns.push(Series::new(YEAR_COLUMN.into(), years).into());
    columns.push(Series::new(RAW_VALUE_COLUMN.into(), values).into());

    let long = DataFrame::new(columns)?;
    debug!(
        rows = height,
        periods,
        expanded = long.height(),
        "unpivoted period columns"
    );
    Ok(long)
}
