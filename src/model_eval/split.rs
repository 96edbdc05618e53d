// split.rs
use crate::model_eval::EvalError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const TEST_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded shuffle split: the first `ceil(n * test_fraction)` shuffled indices
/// are the test partition and the rest are train.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices, EvalError> {
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(EvalError::TooFewSamples { n });
    }

    let mut idx: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let train = idx.split_off(n_test);
    Ok(SplitIndices { train, test: idx })
}

/// Unshuffled k-fold: the first `n % k` folds take one extra sample.
/// Returns `(train, validation)` index pairs.
pub fn k_fold(n: usize, k: usize) -> Result<Vec<SplitIndices>, EvalError> {
    if k < 2 || k > n {
        return Err(EvalError::InvalidFolds { folds: k, n });
    }

    let mut folds = Vec::with_capacity(k);
    let mut start = 0;

    for f in 0..k {
        let size = n / k + usize::from(f < n % k);
        let stop = start + size;

        let test: Vec<usize> = (start..stop).collect();
        let train: Vec<usize> = (0..start).chain(stop..n).collect();
        folds.push(SplitIndices { train, test });

        start = stop;
    }

    Ok(folds)
}

pub fn take_rows(x: ArrayView2<'_, f64>, idx: &[usize]) -> Array2<f64> {
    x.select(Axis(0), idx)
}

pub fn take(y: ArrayView1<'_, f64>, idx: &[usize]) -> Array1<f64> {
    y.select(Axis(0), idx)
}
