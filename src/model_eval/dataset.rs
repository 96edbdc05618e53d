// dataset.rs
use crate::model_eval::EvalError;
use ndarray::{Array1, Array2};
use std::mem::take;
use std::path::Path;

/// Numeric feature matrix plus the target column split off from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub features: Array2<f64>,
    pub target: Array1<f64>,
}

impl Dataset {
    pub fn new(
        feature_names: Vec<String>,
        features: Array2<f64>,
        target: Array1<f64>,
    ) -> Result<Self, EvalError> {
        if features.nrows() != target.len() {
            return Err(EvalError::ShapeMismatch(format!(
                "{} feature rows vs {} targets",
                features.nrows(),
                target.len()
            )));
        }
        if feature_names.len() != features.ncols() {
            return Err(EvalError::ShapeMismatch(format!(
                "{} names for {} feature columns",
                feature_names.len(),
                features.ncols()
            )));
        }
        Ok(Self {
            feature_names,
            features,
            target,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.target.len()
    }

    pub fn from_csv_path(path: impl AsRef<Path>, target_column: &str) -> Result<Self, EvalError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text, target_column)
    }

    /// Headered, comma-separated, all-numeric table.
    pub fn from_csv_str(text: &str, target_column: &str) -> Result<Self, EvalError> {
        let mut rows = parse_rows(text).into_iter();

        let header = rows
            .next()
            .ok_or_else(|| EvalError::Dataset("empty file".to_string()))?;
        let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();

        let target_idx = header
            .iter()
            .position(|h| h == target_column)
            .ok_or_else(|| EvalError::Dataset(format!("no column named '{target_column}'")))?;

        let feature_names: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target_idx)
            .map(|(_, h)| h.clone())
            .collect();

        let mut values = Vec::new();
        let mut target = Vec::new();
        let mut n_rows = 0;

        for (r, row) in rows.enumerate() {
            let line = r + 2;
            if row.len() != header.len() {
                return Err(EvalError::Dataset(format!(
                    "line {line}: expected {} fields, found {}",
                    header.len(),
                    row.len()
                )));
            }

            for (c, cell) in row.iter().enumerate() {
                // "nan" and "inf" parse as f64 but are not usable values.
                let v = cell
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        EvalError::Dataset(format!(
                            "line {line}, column '{}': '{cell}' is not numeric",
                            header[c]
                        ))
                    })?;

                if c == target_idx {
                    target.push(v);
                } else {
                    values.push(v);
                }
            }
            n_rows += 1;
        }

        let features = Array2::from_shape_vec((n_rows, feature_names.len()), values)
            .map_err(|e| EvalError::ShapeMismatch(e.to_string()))?;

        Self::new(feature_names, features, Array1::from(target))
    }
}

/// Minimal CSV reader: quoted fields, doubled quotes, CRLF. Blank lines are dropped.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                if row.len() == 1 && row[0].trim().is_empty() {
                    row.clear();
                } else {
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    row.push(field);
    if !(row.len() == 1 && row[0].trim().is_empty()) {
        rows.push(row);
    }

    rows
}
