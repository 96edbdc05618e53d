// errors.rs
use crate::config::ConfigError;
use crate::model_eval::EvalError;
use crate::scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Open DB failed: {0}")]
    Open(String),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Failed to encode amenities: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection slot unavailable")]
    Internal,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything `main` can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
