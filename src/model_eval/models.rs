// models.rs
use crate::model_eval::metrics::r2_score;
use crate::model_eval::EvalError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    Ridge,
    Lasso,
}

impl ModelType {
    pub fn build(self, alpha: f64) -> Box<dyn Regressor> {
        match self {
            ModelType::Ridge => Box::new(Ridge::new(alpha)),
            ModelType::Lasso => Box::new(Lasso::new(alpha)),
        }
    }
}

impl FromStr for ModelType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ridge" => Ok(ModelType::Ridge),
            "lasso" => Ok(ModelType::Lasso),
            _ => Err(EvalError::UnsupportedModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Ridge => write!(f, "ridge"),
            ModelType::Lasso => write!(f, "lasso"),
        }
    }
}

pub trait Regressor {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<(), EvalError>;

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EvalError>;

    /// Coefficients and intercept, once fit.
    fn fitted(&self) -> Option<&LinearFit>;

    /// R² of the model's predictions on `x` against `y`.
    fn score(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64, EvalError> {
        let pred = self.predict(x)?;
        Ok(r2_score(y, pred.view()))
    }
}

/// Coefficients plus intercept, shared by both models.
#[derive(Debug, Clone)]
pub struct LinearFit {
    pub coef: Array1<f64>,
    pub intercept: f64,
}

impl LinearFit {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EvalError> {
        if x.ncols() != self.coef.len() {
            return Err(EvalError::ShapeMismatch(format!(
                "model fit on {} features, got {}",
                self.coef.len(),
                x.ncols()
            )));
        }
        Ok(x.dot(&self.coef) + self.intercept)
    }
}

struct Centered {
    x: Array2<f64>,
    y: Array1<f64>,
    x_mean: Array1<f64>,
    y_mean: f64,
}

fn center(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Centered, EvalError> {
    if x.nrows() != y.len() {
        return Err(EvalError::ShapeMismatch(format!(
            "{} rows vs {} targets",
            x.nrows(),
            y.len()
        )));
    }
    let x_mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| EvalError::ShapeMismatch("cannot fit on zero rows".into()))?;
    let y_mean = y
        .mean()
        .ok_or_else(|| EvalError::ShapeMismatch("cannot fit on zero rows".into()))?;

    Ok(Centered {
        x: &x - &x_mean,
        y: &y - y_mean,
        x_mean,
        y_mean,
    })
}

/// L2-penalized least squares, solved in closed form.
#[derive(Debug, Clone)]
pub struct Ridge {
    pub alpha: f64,
    fitted: Option<LinearFit>,
}

impl Ridge {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fitted: None,
        }
    }
}

impl Regressor for Ridge {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<(), EvalError> {
        let c = center(x, y)?;

        // (XᵀX + αI) w = Xᵀy
        let mut a = c.x.t().dot(&c.x);
        for i in 0..a.nrows() {
            a[[i, i]] += self.alpha;
        }
        let b = c.x.t().dot(&c.y);

        let coef = solve(a, b)?;
        let intercept = c.y_mean - c.x_mean.dot(&coef);

        self.fitted = Some(LinearFit { coef, intercept });
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EvalError> {
        self.fitted.as_ref().ok_or(EvalError::NotFitted)?.predict(x)
    }

    fn fitted(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }
}

/// L1-penalized least squares via cyclic coordinate descent.
///
/// Minimizes `(1 / 2n) * ||y - Xw - b||² + alpha * ||w||₁`.
#[derive(Debug, Clone)]
pub struct Lasso {
    pub alpha: f64,
    pub max_iter: usize,
    pub tol: f64,
    fitted: Option<LinearFit>,
}

impl Lasso {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            max_iter: 1000,
            tol: 1e-4,
            fitted: None,
        }
    }
}

fn soft_threshold(v: f64, t: f64) -> f64 {
    if v > t {
        v - t
    } else if v < -t {
        v + t
    } else {
        0.0
    }
}

impl Regressor for Lasso {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<(), EvalError> {
        let c = center(x, y)?;
        let n = c.x.nrows() as f64;
        let p = c.x.ncols();

        let col_norms: Vec<f64> = c.x.columns().into_iter().map(|col| col.dot(&col)).collect();
        let mut w = Array1::<f64>::zeros(p);
        let mut residual = c.y.clone();
        let threshold = self.alpha * n;

        for _ in 0..self.max_iter {
            let mut max_change = 0.0f64;
            let mut max_w = 0.0f64;

            for j in 0..p {
                let norm = col_norms[j];
                let old = w[j];
                let col = c.x.column(j);

                let new = if norm == 0.0 {
                    0.0
                } else {
                    let rho = col.dot(&residual) + old * norm;
                    soft_threshold(rho, threshold) / norm
                };

                if new != old {
                    residual.scaled_add(old - new, &col);
                    w[j] = new;
                }

                max_change = max_change.max((new - old).abs());
                max_w = max_w.max(new.abs());
            }

            if max_w == 0.0 || max_change <= self.tol * max_w {
                break;
            }
        }

        let intercept = c.y_mean - c.x_mean.dot(&w);
        self.fitted = Some(LinearFit { coef: w, intercept });
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, EvalError> {
        self.fitted.as_ref().ok_or(EvalError::NotFitted)?.predict(x)
    }

    fn fitted(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, EvalError> {
    let n = a.nrows();
    let eps = 1e-12 * a.iter().fold(1.0f64, |m, v| m.max(v.abs()));

    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| a[[i, k]].abs().total_cmp(&a[[j, k]].abs()))
            .unwrap_or(k);

        if a[[pivot, k]].abs() <= eps {
            return Err(EvalError::SingularSystem);
        }

        if pivot != k {
            for col in 0..n {
                a.swap([k, col], [pivot, col]);
            }
            b.swap(k, pivot);
        }

        for i in (k + 1)..n {
            let factor = a[[i, k]] / a[[k, k]];
            if factor == 0.0 {
                continue;
            }
            for col in k..n {
                a[[i, col]] -= factor * a[[k, col]];
            }
            b[i] -= factor * b[k];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let tail: f64 = ((i + 1)..n).map(|j| a[[i, j]] * x[j]).sum();
        x[i] = (b[i] - tail) / a[[i, i]];
    }

    Ok(x)
}
