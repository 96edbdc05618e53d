use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("No other models supported: '{0}' (expected ridge or lasso)")]
    UnsupportedModel(String),

    #[error("Too few samples ({n}) to split into train and test")]
    TooFewSamples { n: usize },

    #[error("Alpha candidate list is empty")]
    EmptyAlphaGrid,

    #[error("Cannot use {folds} folds with {n} training samples")]
    InvalidFolds { folds: usize, n: usize },

    #[error("Linear system is singular; try a larger alpha")]
    SingularSystem,

    #[error("Model used before fit")]
    NotFitted,

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
