use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::folds::FOLD_COUNT;

/// Which cells the trainer leaves out when counting feature values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FeatureExclusion {
    /// Skip the class column only.
    #[default]
    ClassColumn,
    /// Skip any cell whose text equals the row's class label, wherever it sits.
    MatchingLabel,
}

/// How the noiser picks the columns it resamples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NoiseSampling {
    /// Independent draws; a column can be picked more than once.
    #[default]
    WithReplacement,
    /// Distinct columns only.
    Distinct,
}

/// Knobs for one two-pass run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub missing: String,
    pub default_bins: usize,
    pub folds: usize,
    pub exclusion: FeatureExclusion,
    pub noise_sampling: NoiseSampling,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            missing: "?".to_string(),
            default_bins: 4,
            folds: FOLD_COUNT,
            exclusion: FeatureExclusion::default(),
            noise_sampling: NoiseSampling::default(),
        }
    }
}

/// The bundled datasets and the sentinel each uses for missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetPreset {
    BreastCancer,
    Glass,
    Iris,
    Soybean,
    VotingRecords,
}

impl DatasetPreset {
    pub fn relative_path(self) -> &'static str {
        match self {
            DatasetPreset::BreastCancer => "breast-cancer/breast-cancer-wisconsin.csv",
            DatasetPreset::Glass => "glass/glass.csv",
            DatasetPreset::Iris => "iris/iris.csv",
            DatasetPreset::Soybean => "soybean/soybean-small.csv",
            DatasetPreset::VotingRecords => "voting-records/house-votes-84.csv",
        }
    }

    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.relative_path())
    }

    pub fn missing(self) -> &'static str {
        match self {
            DatasetPreset::VotingRecords => "",
            _ => "?",
        }
    }
}
