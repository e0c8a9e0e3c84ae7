use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BayesError {
    /// One of the classes never appeared in the training data, so the class
    /// priors are undefined.
    #[error("degenerate training set: {num_pos} positive and {num_neg} negative examples")]
    DegenerateTrainingSet { num_pos: f64, num_neg: f64 },

    #[error("smoothing constant must be finite and non-negative, got {0}")]
    InvalidLambda(f64),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BayesError>;
