//! End-to-end evaluation: preprocess, split, cross-validate, then repeat on a noised copy.

use std::fmt;

use rand::Rng;
use tracing::{debug, info};

use crate::bayes::{NaiveBayesClassifier, Tally};
use crate::config::{FeatureExclusion, PipelineConfig};
use crate::dataset::{Dataset, Row};
use crate::folds::{group_by_class, stratified_split};
use crate::header::Header;
use crate::noise::{noise_features, NoiseReport};
use crate::preprocess::{bin_continuous_values, impute_missing, Columns};

/// One classified test row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Index of the fold the row was tested in.
    pub fold: usize,
    /// Position of the row within that fold.
    pub row: usize,
    pub actual: String,
    pub predicted: Option<String>,
}

/// Aggregate result of one cross-validation pass.
#[derive(Debug, Clone, Default)]
pub struct CrossValidation {
    pub tally: Tally,
    pub predictions: Vec<Prediction>,
}

/// Imputes then bins a copy of the rows, returning them row-major again.
pub fn prepare(header: &Header, rows: Vec<Row>, config: &PipelineConfig) -> Vec<Row> {
    let columns = Columns::from_rows(rows, header.len());
    let columns = impute_missing(columns, header, &config.missing);
    let columns = bin_continuous_values(columns, header, config.default_bins);
    columns.into_rows()
}

/// Trains on each fold and tests on the one after it, wrapping around.
pub fn cross_validate(
    folds: &[Vec<Row>],
    class_index: usize,
    exclusion: FeatureExclusion,
) -> CrossValidation {
    let mut result = CrossValidation::default();

    for (index, train) in folds.iter().enumerate() {
        let test_index = (index + 1) % folds.len();
        let test = &folds[test_index];
        let model = NaiveBayesClassifier::train(train, class_index, exclusion);

        let mut tally = Tally::default();
        for (position, row) in test.iter().enumerate() {
            let predicted = model.classify(row);
            let actual = &row[class_index];
            tally.record(predicted == Some(actual.as_str()));
            result.predictions.push(Prediction {
                fold: test_index,
                row: position,
                actual: actual.clone(),
                predicted: predicted.map(str::to_string),
            });
        }

        debug!(
            "trained on fold {} ({} rows), tested on fold {}: {} right, {} wrong",
            index,
            train.len(),
            test_index,
            tally.right,
            tally.wrong
        );
        result.tally += tally;
    }

    result
}

/// Prepares the rows, deals them into folds and cross-validates.
pub fn evaluate<R: Rng + ?Sized>(
    header: &Header,
    rows: Vec<Row>,
    config: &PipelineConfig,
    rng: &mut R,
) -> CrossValidation {
    let class_index = header.class_index();
    let prepared = prepare(header, rows, config);
    let folds = stratified_split(group_by_class(prepared, class_index), config.folds, rng);
    cross_validate(&folds, class_index, config.exclusion)
}

/// Results of the plain run and the noised rerun.
#[derive(Debug, Clone)]
pub struct Report {
    pub class_index: usize,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    pub baseline: CrossValidation,
    pub noise: NoiseReport,
    pub noised: CrossValidation,
}

/// Evaluates the dataset as loaded, then again after resampling a tenth of its features.
pub fn run<R: Rng + ?Sized>(dataset: Dataset, config: &PipelineConfig, rng: &mut R) -> Report {
    let Dataset { header, mut rows } = dataset;
    info!(
        "class variable is at index {}, {} features",
        header.class_index(),
        header.feature_count()
    );

    let baseline = evaluate(&header, rows.clone(), config, rng);
    info!("baseline accuracy {:.2}%", baseline.tally.accuracy());

    let noise = noise_features(
        &mut rows,
        header.class_index(),
        header.feature_count(),
        config.noise_sampling,
        rng,
    );
    let noised = evaluate(&header, rows, config, rng);
    info!("noised accuracy {:.2}%", noised.tally.accuracy());

    Report {
        class_index: header.class_index(),
        feature_count: header.feature_count(),
        feature_names: header.names().to_vec(),
        baseline,
        noise,
        noised,
    }
}

const RULE: &str = "----------------------------------";

fn write_tally(f: &mut fmt::Formatter<'_>, tally: &Tally) -> fmt::Result {
    writeln!(f, "Total Classified Right: {}", tally.right)?;
    writeln!(f, "Total Classified Wrong: {}", tally.wrong)?;
    writeln!(f, "0-1 Loss: {:.2}%", tally.accuracy())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class variable is at index {}", self.class_index)?;
        writeln!(f, "This data set has: {} features", self.feature_count)?;
        writeln!(f, "Non-Shuffled Version")?;
        writeln!(f, "{}", RULE)?;
        write_tally(f, &self.baseline.tally)?;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "10% - {} feature(s) were shuffled", self.noise.requested)?;
        let names: Vec<&str> = self
            .noise
            .distinct_columns()
            .into_iter()
            .filter_map(|c| self.feature_names.get(c).map(String::as_str))
            .collect();
        if !names.is_empty() {
            writeln!(f, "Shuffled columns: {}", names.join(", "))?;
        }
        writeln!(f, "{}", RULE)?;

        writeln!(f, "Shuffled Version")?;
        writeln!(f, "{}", RULE)?;
        write_tally(f, &self.noised.tally)
    }
}
