use thiserror::Error;

/// Errors that stop a run. Per-column data problems are logged, not returned.
#[derive(Debug, Error)]
pub enum BayesError {
    #[error("could not find class column in header")]
    ClassColumnNotFound,

    #[error("input has no header line")]
    EmptyInput,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BayesError>;
