//! Categorical Naive Bayes with stratified cross-validation over CSV datasets.
//!
//! Columns can opt into mean imputation and equal-width binning through
//! directives in their header names (`!impute`, `!bin`, `!bin-6`). Each run
//! is evaluated twice: once as loaded, and once after a tenth of the feature
//! columns have been resampled from their own values.

pub mod bayes;
pub mod config;
pub mod dataset;
pub mod error;
pub mod folds;
pub mod header;
pub mod noise;
pub mod pipeline;
pub mod preprocess;
pub mod report;

pub use bayes::{NaiveBayesClassifier, Tally};
pub use config::{DatasetPreset, FeatureExclusion, NoiseSampling, PipelineConfig};
pub use dataset::{Dataset, Row};
pub use error::{BayesError, Result};
pub use header::{ColumnDirectives, Directive, Header};
pub use pipeline::{run, CrossValidation, Prediction, Report};
