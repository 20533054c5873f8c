//! Row cleaning, age filtering and column pruning of the long-form table.

use polars::prelude::*;
use tracing::debug;

use estat_model::{AGE_COLUMN, COUNTRY_COLUMN, DatasetProfile, YEAR_COLUMN};

use crate::error::{Result, TransformError};
use crate::normalization::{clean_age, clean_country, clean_value, clean_year};
use crate::reshape::RAW_VALUE_COLUMN;

/// Cleans every row of an unpivoted frame, dropping rows that fail.
///
/// A row survives only when its year and value clean successfully and, for
/// profiles with a numeric age, its age does too. Surviving rows keep their
/// order. The output holds the split dimensions (country without brackets,
/// age as `i64` when cleaned), `year` as `i64` and the profile's value column
/// as `f64`.
pub fn clean_rows(long: &DataFrame, profile: &DatasetProfile) -> Result<DataFrame> {
    let dimensions = profile.split_columns();
    let dimension_cas = dimensions
        .iter()
        .map(|name| {
            long.column(name)
                .and_then(|column| column.str())
                .map_err(|_| TransformError::UnknownDimension { name: name.clone() })
        })
        .collect::<Result<Vec<_>>>()?;
    let years = long.column(YEAR_COLUMN)?.str()?;
    let values = long.column(RAW_VALUE_COLUMN)?.str()?;

    let country_idx = dimensions.iter().position(|name| name == COUNTRY_COLUMN);
    let age_idx = if profile.has_numeric_age() {
        dimensions.iter().position(|name| name == AGE_COLUMN)
    } else {
        None
    };

    let mut text_values: Vec<Vec<Option<String>>> = vec![Vec::new(); dimensions.len()];
    let mut ages: Vec<i64> = Vec::new();
    let mut out_years: Vec<i64> = Vec::with_capacity(long.height());
    let mut out_values: Vec<f64> = Vec::with_capacity(long.height());

    for row in 0..long.height() {
        let Some(year) = years
            .get(row)
            .and_then(|label| clean_year(profile.year_rule, label))
        else {
            continue;
        };
        let Some(value) = values
            .get(row)
            .and_then(|raw| clean_value(profile.value_rule, raw))
        else {
            continue;
        };
        let age = match age_idx {
            Some(idx) => match dimension_cas[idx].get(row).and_then(clean_age) {
                Some(age) => Some(age),
                None => continue,
            },
            None => None,
        };

        for (idx, (out, ca)) in text_values.iter_mut().zip(&dimension_cas).enumerate() {
            if Some(idx) == age_idx {
                continue;
            }
            let cell = ca.get(row);
            out.push(if Some(idx) == country_idx {
                cell.map(clean_country)
            } else {
                cell.map(str::to_string)
            });
        }
        if let Some(age) = age {
            ages.push(age);
        }
        out_years.push(year);
        out_values.push(value);
    }

    let mut columns: Vec<Column> = Vec::with_capacity(dimensions.len() + 2);
    for (idx, (name, data)) in dimensions.iter().zip(text_values).enumerate() {
        if Some(idx) == age_idx {
            columns.push(Series::new(name.as_str().into(), std::mem::take(&mut ages)).into());
        } else {
            columns.push(Series::new(name.as_str().into(), data).into());
        }
    }
    columns.push(Series::new(YEAR_COLUMN.into(), out_years).into());
    columns.push(Series::new(profile.value_column.as_str().into(), out_values).into());

    let cleaned = DataFrame::new(columns)?;
    debug!(
        profile = %profile.name,
        rows = long.height(),
        kept = cleaned.height(),
        dropped = long.height() - cleaned.height(),
        "cleaned rows"
    );
    Ok(cleaned)
}

/// Keeps only rows whose integer `age` equals `age`.
pub fn filter_age(df: &DataFrame, age: i64) -> Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(AGE_COLUMN).eq(lit(age)))
        .collect()?;
    Ok(filtered)
}

/// Drops the profile's pruned columns and orders the rest as the output
/// contract lists them.
pub fn prune_columns(df: &DataFrame, profile: &DatasetProfile) -> Result<DataFrame> {
    Ok(df.select(profile.output_columns())?)
}
