//! Errors raised at the crate's boundaries.
//!
//! The build/encode pipeline itself never fails; these cover configuration, input files,
//! HTTP client setup and adapter output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid CSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("HTTP client error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("invalid endpoint {endpoint}: {reason}")]
  InvalidEndpoint { endpoint: String, reason: String },

  #[error("unsupported payload: {0}")]
  UnsupportedPayload(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
