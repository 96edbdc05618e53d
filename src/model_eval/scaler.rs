// scaler.rs
use crate::model_eval::EvalError;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Per-column standardization. Statistics come from `fit` only, so test
/// rows are scaled with training means and deviations.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(x: ArrayView2<'_, f64>) -> Result<Self, EvalError> {
        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| EvalError::ShapeMismatch("cannot scale an empty matrix".into()))?;

        // Population std; constant columns are left unscaled.
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, EvalError> {
        if x.ncols() != self.mean.len() {
            return Err(EvalError::ShapeMismatch(format!(
                "scaler fit on {} columns, got {}",
                self.mean.len(),
                x.ncols()
            )));
        }
        Ok((&x - &self.mean) / &self.scale)
    }

    pub fn fit_transform(x: ArrayView2<'_, f64>) -> Result<(Self, Array2<f64>), EvalError> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn training_columns_become_zero_mean_unit_std() {
        let x = array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0]];
        let (_, scaled) = StandardScaler::fit_transform(x.view()).unwrap();

        let means = scaled.mean_axis(Axis(0)).unwrap();
        assert!(means.iter().all(|m| m.abs() < 1e-12));
        assert!((scaled.column(0).std(0.0) - 1.0).abs() < 1e-12);
        // constant column: centered, not divided by zero
        assert!(scaled.column(1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_rows_use_training_statistics() {
        let train = array![[0.0], [2.0]];
        let test = array![[4.0]];
        let scaler = StandardScaler::fit(train.view()).unwrap();

        let t = scaler.transform(test.view()).unwrap();
        assert!((t[[0, 0]] - 3.0).abs() < 1e-12);
    }
}
