use std::collections::{hash_map::Entry, BTreeMap, HashMap};

use crate::config::FeatureExclusion;
use crate::dataset::Row;

/// Raw counts gathered in one pass: class -> column -> value -> occurrences.
#[derive(Debug, Default)]
struct ValueCounts {
    rows_per_class: BTreeMap<String, usize>,
    per_class: BTreeMap<String, Vec<HashMap<String, usize>>>,
}

impl ValueCounts {
    fn count(fold: &[Row], class_index: usize, exclusion: FeatureExclusion) -> Self {
        let mut counts = ValueCounts::default();

        for row in fold {
            let class = &row[class_index];
            *counts.rows_per_class.entry(class.clone()).or_insert(0) += 1;

            let columns = counts
                .per_class
                .entry(class.clone())
                .or_insert_with(|| vec![HashMap::new(); row.len()]);

            for (index, (column, value)) in columns.iter_mut().zip(row).enumerate() {
                let excluded = match exclusion {
                    FeatureExclusion::ClassColumn => index == class_index,
                    FeatureExclusion::MatchingLabel => value == class,
                };
                if excluded {
                    continue;
                }

                match column.entry(value.clone()) {
                    Entry::Occupied(entry) => *entry.into_mut() += 1,
                    Entry::Vacant(entry) => {
                        entry.insert(1);
                    }
                }
            }
        }

        counts
    }
}

/// Categorical Naive Bayes model trained on a single fold.
///
/// Conditionals are Laplace smoothed over the values seen in the fold:
/// `P(v | class, column) = (count(v) + 1) / (column total + distinct values)`.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    class_index: usize,
    likelihoods: BTreeMap<String, Vec<HashMap<String, f64>>>,
    priors: BTreeMap<String, f64>,
}

impl NaiveBayesClassifier {
    pub fn train(fold: &[Row], class_index: usize, exclusion: FeatureExclusion) -> Self {
        let counts = ValueCounts::count(fold, class_index, exclusion);

        // Turn the raw counts into smoothed conditional probabilities:
        let likelihoods: BTreeMap<String, Vec<HashMap<String, f64>>> = counts
            .per_class
            .into_iter()
            .map(|(class, columns)| {
                let columns = columns
                    .into_iter()
                    .map(|column| {
                        let total = column.values().sum::<usize>() as f64;
                        let distinct = column.len() as f64;
                        column
                            .into_iter()
                            .map(|(value, count)| {
                                (value, (count as f64 + 1.0) / (total + distinct))
                            })
                            .collect::<HashMap<_, _>>()
                    })
                    .collect::<Vec<_>>();
                (class, columns)
            })
            .collect();

        let num_records = fold.len() as f64;
        let priors: BTreeMap<String, f64> = counts
            .rows_per_class
            .into_iter()
            .map(|(class, rows)| (class, rows as f64 / num_records))
            .collect();

        NaiveBayesClassifier {
            class_index,
            likelihoods,
            priors,
        }
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Class labels in the order used for tie-breaking.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.priors.keys().map(String::as_str)
    }

    pub fn prior(&self, class: &str) -> Option<f64> {
        self.priors.get(class).copied()
    }

    /// Smoothed `P(value | class, column)`, or `None` if the value never occurred.
    pub fn likelihood(&self, class: &str, column: usize, value: &str) -> Option<f64> {
        self.likelihoods.get(class)?.get(column)?.get(value).copied()
    }

    /// Unnormalised posterior of `class` for `row`. Any unseen value makes it 0.
    pub fn posterior(&self, class: &str, row: &[String]) -> f64 {
        let Some(prior) = self.prior(class) else {
            return 0.0;
        };

        let mut posterior = prior;
        for (column, value) in row.iter().enumerate() {
            if column == self.class_index {
                continue;
            }
            match self.likelihood(class, column, value) {
                Some(beta) => posterior *= beta,
                None => return 0.0,
            }
        }
        posterior
    }

    /// The class with the strictly greatest posterior; ties keep the earlier label.
    pub fn classify(&self, row: &[String]) -> Option<&str> {
        let (best_class, _) = self.classes().fold(
            (None, -1.0),
            |(best_class, best_score), class| {
                let score = self.posterior(class, row);
                if score > best_score {
                    (Some(class), score)
                } else {
                    (best_class, best_score)
                }
            },
        );

        best_class
    }

    /// Classifies every row of `fold` and tallies exact label matches.
    pub fn score(&self, fold: &[Row]) -> Tally {
        fold.iter().fold(Tally::default(), |mut tally, row| {
            tally.record(self.classify(row) == Some(row[self.class_index].as_str()));
            tally
        })
    }
}

/// Right and wrong predictions under 0/1 loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub right: usize,
    pub wrong: usize,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.right += 1;
        } else {
            self.wrong += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.right + self.wrong
    }

    /// Share of right predictions as a percentage, 0 when nothing was classified.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.right as f64 / self.total() as f64 * 100.0
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.right += other.right;
        self.wrong += other.wrong;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    fn row(values: &[&str]) -> Row {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn laplace_smoothing_matches_hand_computation() {
        let fold = rows(&[&["A", "x"], &["A", "x"], &["A", "y"], &["B", "z"]]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        // A: x=2, y=1 -> total 3, distinct 2
        assert!((model.likelihood("A", 1, "x").unwrap() - 3.0 / 5.0).abs() < 1e-12);
        assert!((model.likelihood("A", 1, "y").unwrap() - 2.0 / 5.0).abs() < 1e-12);
        assert_eq!(model.likelihood("A", 1, "z"), None);
        assert_eq!(model.likelihood("B", 1, "z"), Some(1.0));
        assert_eq!(model.likelihood("A", 0, "A"), None);
    }

    #[test]
    fn conditionals_are_in_unit_interval_and_priors_sum_to_one() {
        let fold = rows(&[
            &["A", "1", "p"],
            &["B", "2", "q"],
            &["A", "3", "p"],
            &["C", "1", "r"],
            &["B", "2", "s"],
        ]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        let prior_sum: f64 = model.classes().filter_map(|c| model.prior(c)).sum();
        assert!((prior_sum - 1.0).abs() < 1e-12);
        assert!((model.prior("B").unwrap() - 0.4).abs() < 1e-12);

        for table in model.likelihoods.values() {
            for column in table {
                for &p in column.values() {
                    assert!(p > 0.0 && p <= 1.0);
                }
            }
        }
    }

    #[test]
    fn unseen_value_zeroes_posterior() {
        let fold = rows(&[&["A", "x", "1"], &["B", "y", "2"]]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        assert_eq!(model.posterior("A", &row(&["?", "y", "1"])), 0.0);
        assert!(model.posterior("A", &row(&["?", "x", "1"])) > 0.0);
        assert_eq!(model.posterior("missing", &row(&["?", "x", "1"])), 0.0);
    }

    #[test]
    fn memorised_rows_are_classified_back() {
        let fold = rows(&[&["A", "x", "1"], &["A", "x", "2"], &["B", "y", "3"]]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        for r in &fold {
            assert_eq!(model.classify(r), Some(r[0].as_str()));
        }
        assert_eq!(model.score(&fold), Tally { right: 3, wrong: 0 });
    }

    #[test]
    fn classification_is_row_independent() {
        let fold = rows(&[&["A", "x"], &["B", "y"]]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        // A strong A row first must not leak into the B row that follows.
        let test = rows(&[&["A", "x"], &["B", "y"]]);
        assert_eq!(model.score(&test), Tally { right: 2, wrong: 0 });
    }

    #[test]
    fn ties_resolve_to_first_label() {
        let fold = rows(&[&["B", "x"], &["A", "x"]]);
        let model = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);

        assert_eq!(model.classify(&row(&["?", "x"])), Some("A"));
        // every posterior is zero: still the first label
        assert_eq!(model.classify(&row(&["?", "unseen"])), Some("A"));
    }

    #[test]
    fn empty_fold_predicts_nothing() {
        let model = NaiveBayesClassifier::train(&[], 0, FeatureExclusion::ClassColumn);
        let test = rows(&[&["A", "x"]]);

        assert_eq!(model.classify(&test[0]), None);
        assert_eq!(model.score(&test), Tally { right: 0, wrong: 1 });
    }

    #[test]
    fn matching_label_exclusion_drops_cells_equal_to_label() {
        let fold = rows(&[&["yes", "yes", "n"], &["no", "yes", "y"]]);

        let by_label = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::MatchingLabel);
        assert_eq!(by_label.likelihood("yes", 1, "yes"), None);
        assert_eq!(by_label.likelihood("no", 1, "yes"), Some(1.0));

        let by_column = NaiveBayesClassifier::train(&fold, 0, FeatureExclusion::ClassColumn);
        assert_eq!(by_column.likelihood("yes", 1, "yes"), Some(1.0));
    }

    #[test]
    fn accuracy_is_a_percentage() {
        let tally = Tally { right: 3, wrong: 1 };
        assert!((tally.accuracy() - 75.0).abs() < 1e-12);
        assert_eq!(Tally::default().accuracy(), 0.0);

        let mut sum = Tally::default();
        sum += tally;
        sum += Tally { right: 1, wrong: 0 };
        assert_eq!(sum, Tally { right: 4, wrong: 1 });
    }
}
