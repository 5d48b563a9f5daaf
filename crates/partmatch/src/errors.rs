use libpartmatch::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("invalid input: {0}")]
  InvalidInput(#[from] serde_json::Error),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("{0}")]
  UnsupportedComponent(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

impl From<PartMatchError> for AppError {
  fn from(value: PartMatchError) -> Self {
    match value {
      err @ PartMatchError::ConfigurationMismatch { .. } => AppError::UnsupportedComponent(err.to_string()),
      PartMatchError::InvalidConfiguration(err) => AppError::ConfigError(err),
      PartMatchError::InvalidParameters(err) => AppError::BadRequest(err),
      PartMatchError::OtherError(err) => AppError::OtherError(err),
    }
  }
}
