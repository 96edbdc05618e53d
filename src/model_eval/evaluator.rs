// evaluator.rs
use crate::model_eval::cv::{cross_validate_alpha, DEFAULT_FOLDS};
use crate::model_eval::dataset::Dataset;
use crate::model_eval::metrics::{mean, rmse, std};
use crate::model_eval::models::ModelType;
use crate::model_eval::scaler::StandardScaler;
use crate::model_eval::split::{take, take_rows, train_test_split, TEST_FRACTION};
use crate::model_eval::EvalError;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AlphaChoice {
    Fixed(f64),
    CrossValidate { candidates: Vec<f64>, folds: usize },
}

impl AlphaChoice {
    pub fn grid(candidates: Vec<f64>) -> Self {
        AlphaChoice::CrossValidate {
            candidates,
            folds: DEFAULT_FOLDS,
        }
    }
}

impl Default for AlphaChoice {
    fn default() -> Self {
        AlphaChoice::Fixed(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct EvalSpec {
    pub model: ModelType,
    pub seeds: Vec<u64>,
    pub alpha: AlphaChoice,
}

impl EvalSpec {
    /// Rejects unknown model names up front, before any data is touched.
    pub fn parse(model: &str, seeds: Vec<u64>, alpha: AlphaChoice) -> Result<Self, EvalError> {
        Ok(Self {
            model: model.parse()?,
            seeds,
            alpha,
        })
    }
}

/// Scores from one seeded split.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalRun {
    pub seed: u64,
    pub alpha: f64,
    pub train_r2: f64,
    pub test_r2: f64,
    pub rmse: f64,
}

impl EvalRun {
    pub fn r2_ratio(&self) -> f64 {
        self.train_r2 / self.test_r2
    }
}

/// Mean and population std of one metric across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub mean: f64,
    pub std: f64,
}

impl Stat {
    fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std: std(values),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5} +- {:.5}", self.mean, self.std)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalSummary {
    pub model: ModelType,
    pub alphas: Vec<f64>,
    pub alpha: Stat,
    pub train_r2: Stat,
    pub test_r2: Stat,
    /// mean(train R²) / mean(test R²)
    pub r2_ratio: f64,
    pub rmse: Stat,
}

impl EvalSummary {
    pub fn from_runs(model: ModelType, runs: &[EvalRun]) -> Self {
        let collect = |f: fn(&EvalRun) -> f64| runs.iter().map(f).collect::<Vec<_>>();

        let alphas = collect(|r| r.alpha);
        let train = collect(|r| r.train_r2);
        let test = collect(|r| r.test_r2);
        let rmses = collect(|r| r.rmse);

        let train_r2 = Stat::of(&train);
        let test_r2 = Stat::of(&test);

        Self {
            model,
            alpha: Stat::of(&alphas),
            alphas,
            r2_ratio: train_r2.mean / test_r2.mean,
            train_r2,
            test_r2,
            rmse: Stat::of(&rmses),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub runs: Vec<EvalRun>,
    pub summary: EvalSummary,
}

/// Parses `model` and evaluates. An unsupported name fails before any split
/// or fit happens.
pub fn evaluate_model(
    dataset: &Dataset,
    model: &str,
    seeds: Vec<u64>,
    alpha: AlphaChoice,
) -> Result<Evaluation, EvalError> {
    let spec = EvalSpec::parse(model, seeds, alpha)?;
    evaluate(dataset, &spec)
}

/// One split/scale/select/fit/score cycle per seed, then the summary.
/// Every seed splits the full dataset afresh.
pub fn evaluate(dataset: &Dataset, spec: &EvalSpec) -> Result<Evaluation, EvalError> {
    info!(model = %spec.model, seeds = spec.seeds.len(), "alpha evaluation in progress");

    let mut runs = Vec::with_capacity(spec.seeds.len());
    for &seed in &spec.seeds {
        let run = evaluate_seed(dataset, spec, seed)?;
        info!(seed, alpha = run.alpha, test_r2 = run.test_r2, "seed evaluated");
        runs.push(run);
    }

    let summary = EvalSummary::from_runs(spec.model, &runs);
    info!("evaluation complete");

    Ok(Evaluation { runs, summary })
}

pub fn evaluate_seed(dataset: &Dataset, spec: &EvalSpec, seed: u64) -> Result<EvalRun, EvalError> {
    let split = train_test_split(dataset.n_samples(), TEST_FRACTION, seed)?;

    let x = dataset.features.view();
    let y = dataset.target.view();
    let x_train = take_rows(x, &split.train);
    let x_test = take_rows(x, &split.test);
    let y_train = take(y, &split.train);
    let y_test = take(y, &split.test);

    let (scaler, x_train) = StandardScaler::fit_transform(x_train.view())?;
    let x_test = scaler.transform(x_test.view())?;

    let alpha = match &spec.alpha {
        AlphaChoice::Fixed(a) => *a,
        AlphaChoice::CrossValidate { candidates, folds } => {
            let (best, _) = cross_validate_alpha(
                spec.model,
                candidates,
                *folds,
                x_train.view(),
                y_train.view(),
            )?;
            best
        }
    };

    let mut model = spec.model.build(alpha);
    model.fit(x_train.view(), y_train.view())?;

    if let Some(fit) = model.fitted() {
        debug!(seed, alpha, intercept = fit.intercept, coef = ?fit.coef.to_vec(), "model fit");
    }

    let train_r2 = model.score(x_train.view(), y_train.view())?;
    let test_r2 = model.score(x_test.view(), y_test.view())?;
    let pred = model.predict(x_test.view())?;

    Ok(EvalRun {
        seed,
        alpha,
        train_r2,
        test_r2,
        rmse: rmse(y_test.view(), pred.view()),
    })
}

impl fmt::Display for EvalRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Random State: {}", self.seed)?;
        writeln!(f, "~~~~~~~~~~~~~~~~~~")?;
        writeln!(f, "Alpha: {}", self.alpha)?;
        writeln!(f, "Train R^2: {:.5}", self.train_r2)?;
        writeln!(f, "Test R^2: {:.5}", self.test_r2)?;
        writeln!(f)?;
        writeln!(f, "Train/Test R^2 Ratio: {:.5}", self.r2_ratio())?;
        writeln!(f)?;
        writeln!(f, "RMSE: {:.5}", self.rmse)?;
        write!(f, "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~")
    }
}

impl fmt::Display for EvalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary ({})", self.model)?;
        writeln!(f)?;
        writeln!(f, "Alphas: {:?}", self.alphas)?;
        writeln!(f, "Avg alpha: {}", self.alpha)?;
        writeln!(f)?;
        writeln!(f, "Mean training r^2: {}", self.train_r2)?;
        writeln!(f, "Mean test r^2: {}", self.test_r2)?;
        writeln!(f, "Avg train/test r^2 ratio: {:.5}", self.r2_ratio)?;
        writeln!(f)?;
        write!(f, "Avg RMSE: {}", self.rmse)
    }
}
