use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::config::NoiseSampling;
use crate::dataset::Row;

/// What the noiser did to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoiseReport {
    /// Number of column picks asked for, ceil(features / 10).
    pub requested: usize,
    /// Columns resampled, in pick order. May repeat under `WithReplacement`.
    pub columns: Vec<usize>,
}

impl NoiseReport {
    pub fn distinct_columns(&self) -> Vec<usize> {
        let mut columns = self.columns.clone();
        columns.sort_unstable();
        columns.dedup();
        columns
    }
}

/// Number of columns to resample: one per ten features, rounded up.
pub fn noised_column_count(feature_count: usize) -> usize {
    (feature_count + 9) / 10
}

/// Resamples about a tenth of the feature columns from their own values.
///
/// Candidate columns are drawn from `0..feature_count`, never the class column.
/// Each picked column is replaced, row by row, with draws (with replacement) from
/// the column's values before it was touched.
pub fn noise_features<R: Rng + ?Sized>(
    rows: &mut [Row],
    class_index: usize,
    feature_count: usize,
    sampling: NoiseSampling,
    rng: &mut R,
) -> NoiseReport {
    let requested = noised_column_count(feature_count);
    let candidates: Vec<usize> = (0..feature_count).filter(|&c| c != class_index).collect();

    if candidates.is_empty() {
        warn!("no feature column can be noised");
        return NoiseReport {
            requested,
            columns: Vec::new(),
        };
    }

    let columns: Vec<usize> = match sampling {
        NoiseSampling::WithReplacement => (0..requested)
            .filter_map(|_| candidates.choose(rng).copied())
            .collect(),
        NoiseSampling::Distinct => candidates
            .choose_multiple(rng, requested)
            .copied()
            .collect(),
    };

    for &column in &columns {
        resample_column(rows, column, rng);
    }
    info!("noised columns {:?}", columns);

    NoiseReport { requested, columns }
}

/// Replaces every cell of `column` with a uniform draw from the column's current values.
pub fn resample_column<R: Rng + ?Sized>(rows: &mut [Row], column: usize, rng: &mut R) {
    let pool: Vec<String> = rows.iter().map(|row| row[column].clone()).collect();

    for row in rows.iter_mut() {
        if let Some(value) = pool.choose(rng) {
            row[column] = value.clone();
        }
    }
}
