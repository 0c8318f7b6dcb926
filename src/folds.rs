use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::dataset::Row;

/// Default number of cross-validation folds.
pub const FOLD_COUNT: usize = 10;

/// Buckets rows by the value of their class column, preserving row order within each bucket.
pub fn group_by_class(rows: Vec<Row>, class_index: usize) -> BTreeMap<String, Vec<Row>> {
    let mut by_class: BTreeMap<String, Vec<Row>> = BTreeMap::new();
    for row in rows {
        by_class
            .entry(row[class_index].clone())
            .or_default()
            .push(row);
    }
    by_class
}

/// Deals rows into `folds` folds, one row per fold in rotation.
///
/// Each draw first picks a class uniformly among those with rows left, then a row
/// uniformly within that class, so classes stay interleaved across folds and fold
/// sizes differ by at most one.
pub fn stratified_split<R: Rng + ?Sized>(
    by_class: BTreeMap<String, Vec<Row>>,
    folds: usize,
    rng: &mut R,
) -> Vec<Vec<Row>> {
    let folds = folds.max(1);
    let mut split: Vec<Vec<Row>> = vec![Vec::new(); folds];
    let mut buckets: Vec<Vec<Row>> = by_class
        .into_values()
        .filter(|rows| !rows.is_empty())
        .collect();
    let mut cursor = 0;

    while !buckets.is_empty() {
        let class_pick = rng.gen_range(0..buckets.len());
        let bucket = &mut buckets[class_pick];
        let row_pick = rng.gen_range(0..bucket.len());
        split[cursor].push(bucket.swap_remove(row_pick));

        if bucket.is_empty() {
            buckets.swap_remove(class_pick);
        }
        cursor = (cursor + 1) % folds;
    }

    debug!(
        "fold sizes: {:?}",
        split.iter().map(Vec::len).collect::<Vec<_>>()
    );

    split
}
