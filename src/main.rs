use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bayes_cv::{report, Dataset, DatasetPreset, FeatureExclusion, NoiseSampling, PipelineConfig};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "bayes-cv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Naive Bayes with stratified 10-fold cross-validation and feature noising", long_about = None)]
struct Args {
    /// CSV dataset; the first line is the header
    path: Option<PathBuf>,

    /// Use one of the bundled datasets instead of a path
    #[arg(long, value_enum, conflicts_with = "path")]
    preset: Option<DatasetPreset>,

    /// Directory the bundled datasets live in
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Cell text marking a missing value (defaults to the preset's, or "?")
    #[arg(long)]
    missing: Option<String>,

    /// Bins for `!bin` columns without `!bin-6`
    #[arg(long, default_value = "4")]
    bins: usize,

    /// Number of cross-validation folds
    #[arg(long, default_value = "10")]
    folds: usize,

    /// Which cells the trainer ignores
    #[arg(long, value_enum, default_value = "class-column")]
    exclusion: FeatureExclusion,

    /// How noised columns are picked
    #[arg(long, value_enum, default_value = "with-replacement")]
    noise_sampling: NoiseSampling,

    /// Seed for fold assignment and noising
    #[arg(long)]
    seed: Option<u64>,

    /// Write per-row predictions of the unmodified run to this CSV file
    #[arg(long)]
    predictions: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let (path, preset_missing) = match (&args.path, args.preset) {
        (Some(path), _) => (path.clone(), None),
        (None, Some(preset)) => (preset.path_in(&args.data_dir), Some(preset.missing())),
        (None, None) => bail!("either a dataset path or --preset is required"),
    };

    if args.bins == 0 {
        bail!("--bins must be at least 1");
    }
    if args.folds == 0 {
        bail!("--folds must be at least 1");
    }

    let config = PipelineConfig {
        missing: args
            .missing
            .clone()
            .or_else(|| preset_missing.map(str::to_string))
            .unwrap_or_else(|| "?".to_string()),
        default_bins: args.bins,
        folds: args.folds,
        exclusion: args.exclusion,
        noise_sampling: args.noise_sampling,
    };

    let dataset = Dataset::from_path(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    let mut rng = match args.seed {
        Some(seed) => {
            info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let result = bayes_cv::run(dataset, &config, &mut rng);
    print!("{}", result);

    if let Some(out) = &args.predictions {
        report::write_predictions(out, &result.baseline.predictions)
            .with_context(|| format!("Failed to write predictions to {}", out.display()))?;
        info!("predictions written to {}", out.display());
    }

    Ok(())
}
