pub mod cv;
pub mod dataset;
mod eval_error;
pub mod evaluator;
pub mod metrics;
pub mod models;
pub mod scaler;
pub mod split;

pub use dataset::Dataset;
pub use eval_error::EvalError;
pub use evaluator::{evaluate, evaluate_model, AlphaChoice, EvalRun, EvalSpec, EvalSummary, Evaluation};
pub use models::{Lasso, ModelType, Regressor, Ridge};
