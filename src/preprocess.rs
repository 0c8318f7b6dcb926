//! Column-wise preprocessing: mean imputation of missing cells and
//! equal-width binning of continuous columns.
//!
//! Both steps work on a column-major copy of the data ([`Columns`]) and
//! only ever rewrite cells; the number of rows and columns never changes.
//! A column whose cells cannot be parsed as numbers is left alone and a
//! warning is logged, the rest of the dataset is still processed.

use std::num::ParseFloatError;

use tracing::{debug, info, warn};

use crate::dataset::Row;
use crate::header::{Directive, Header};

/// Column-major view of a dataset. `columns[c][r]` is the cell at row `r`, column `c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    columns: Vec<Vec<String>>,
}

impl Columns {
    /// Transposes rows into columns. `width` is the header's column count.
    pub fn from_rows(rows: Vec<Row>, width: usize) -> Self {
        let mut columns: Vec<Vec<String>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Columns { columns }
    }

    /// Transposes back to row-major order.
    pub fn into_rows(self) -> Vec<Row> {
        let height = self.columns.first().map_or(0, Vec::len);
        let mut rows: Vec<Row> = (0..height)
            .map(|_| Vec::with_capacity(self.columns.len()))
            .collect();

        for column in self.columns {
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value);
            }
        }

        rows
    }

    pub fn column(&self, index: usize) -> &[String] {
        &self.columns[index]
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

fn parse_number(value: &str) -> Result<f64, ParseFloatError> {
    value.trim().parse::<f64>()
}

/// Replaces `missing` cells in every `!impute` column with the column mean, rounded half up.
pub fn impute_missing(mut data: Columns, header: &Header, missing: &str) -> Columns {
    for (index, column) in data.columns.iter_mut().enumerate() {
        if !header.has_directive(index, Directive::Impute) {
            continue;
        }

        let mut total = 0.0;
        let mut count = 0usize;
        let mut missing_rows = Vec::new();
        let mut parse_failed = false;

        for (row, value) in column.iter().enumerate() {
            if value == missing {
                missing_rows.push(row);
                continue;
            }

            match parse_number(value) {
                Ok(number) => {
                    total += number;
                    count += 1;
                }
                Err(err) => {
                    warn!(
                        "imputation skipped for column {}: cannot parse {:?} at row {} ({})",
                        header.name(index),
                        value,
                        row,
                        err
                    );
                    parse_failed = true;
                    break;
                }
            }
        }

        if parse_failed || missing_rows.is_empty() {
            continue;
        }

        if count == 0 {
            warn!(
                "imputation skipped for column {}: every cell is missing",
                header.name(index)
            );
            continue;
        }

        let mean = (total / count as f64 + 0.5).floor() as i64;
        info!(
            "imputing {} missing value(s) in column {} with {}",
            missing_rows.len(),
            header.name(index),
            mean
        );

        let mean = mean.to_string();
        for row in missing_rows {
            column[row] = mean.clone();
        }
    }

    data
}

/// Equal-width upper bounds: `min + interval * (i + 1)` for each of `bins` buckets.
pub fn bin_thresholds(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let interval = (max - min) / bins as f64;
    (0..bins).map(|i| min + interval * (i + 1) as f64).collect()
}

/// Index of the first threshold that `value` does not exceed.
pub fn bin_index(value: f64, thresholds: &[f64]) -> Option<usize> {
    thresholds.iter().position(|&upper| value <= upper)
}

fn column_range(column: &[String]) -> Result<Option<(f64, f64)>, (usize, ParseFloatError)> {
    let mut range: Option<(f64, f64)> = None;

    for (row, value) in column.iter().enumerate() {
        let number = parse_number(value).map_err(|err| (row, err))?;
        range = Some(match range {
            Some((min, max)) => (min.min(number), max.max(number)),
            None => (number, number),
        });
    }

    Ok(range)
}

/// Replaces every cell of each `!bin` column with the index of its equal-width bin.
///
/// Columns flagged `!bin-6` use six bins, the others use `default_bins`. The last
/// threshold equals the column maximum, so every parseable value lands in some bin
/// unless rounding pushes the last threshold below the maximum; such cells are left
/// unchanged.
pub fn bin_continuous_values(mut data: Columns, header: &Header, default_bins: usize) -> Columns {
    for (index, column) in data.columns.iter_mut().enumerate() {
        let directives = header.directives(index);
        if !directives.bin {
            continue;
        }

        let (min, max) = match column_range(column) {
            Ok(Some(range)) => range,
            Ok(None) => continue,
            Err((row, err)) => {
                warn!(
                    "binning skipped for column {}: cannot parse {:?} at row {} ({})",
                    header.name(index),
                    column[row],
                    row,
                    err
                );
                continue;
            }
        };

        let bins = directives.bin_count(default_bins);
        let thresholds = bin_thresholds(min, max, bins);
        debug!(
            "binning column {} into {} bins over [{}, {}]: {:?}",
            header.name(index),
            bins,
            min,
            max,
            thresholds
        );

        for value in column.iter_mut() {
            // Already validated by column_range.
            let Ok(number) = parse_number(value) else {
                continue;
            };
            if let Some(bin) = bin_index(number, &thresholds) {
                *value = bin.to_string();
            }
        }
    }

    data
}
