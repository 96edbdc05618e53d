// cv.rs
use crate::model_eval::metrics::{mean, mse, r2_score};
use crate::model_eval::models::ModelType;
use crate::model_eval::split::{k_fold, take, take_rows};
use crate::model_eval::EvalError;
use ndarray::{ArrayView1, ArrayView2};
use tracing::debug;

pub const DEFAULT_FOLDS: usize = 3;

/// Mean validation score of one candidate alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaScore {
    pub alpha: f64,
    pub score: f64,
}

/// Picks the best alpha by unshuffled k-fold cross-validation.
///
/// Ridge keeps the highest mean validation R², lasso the lowest mean
/// validation MSE. Ties go to the earlier candidate.
pub fn cross_validate_alpha(
    model: ModelType,
    candidates: &[f64],
    folds: usize,
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
) -> Result<(f64, Vec<AlphaScore>), EvalError> {
    if candidates.is_empty() {
        return Err(EvalError::EmptyAlphaGrid);
    }

    let splits = k_fold(x.nrows(), folds)?;
    let mut scores = Vec::with_capacity(candidates.len());

    for &alpha in candidates {
        let mut fold_scores = Vec::with_capacity(splits.len());

        for split in &splits {
            let x_tr = take_rows(x, &split.train);
            let y_tr = take(y, &split.train);
            let x_va = take_rows(x, &split.test);
            let y_va = take(y, &split.test);

            let mut m = model.build(alpha);
            m.fit(x_tr.view(), y_tr.view())?;
            let pred = m.predict(x_va.view())?;

            fold_scores.push(match model {
                ModelType::Ridge => r2_score(y_va.view(), pred.view()),
                ModelType::Lasso => mse(y_va.view(), pred.view()),
            });
        }

        let score = mean(&fold_scores);
        debug!(alpha, score, "cv candidate");
        scores.push(AlphaScore { alpha, score });
    }

    let better = |new: f64, best: f64| match model {
        ModelType::Ridge => new > best,
        ModelType::Lasso => new < best,
    };

    let mut best = &scores[0];
    for s in &scores[1..] {
        if better(s.score, best.score) {
            best = s;
        }
    }

    Ok((best.alpha, scores))
}
