#[derive(Debug, thiserror::Error)]
pub enum PartMatchError {
  #[error("product group '{group}' and family '{family}' are not covered by the mapping configuration")]
  ConfigurationMismatch { group: String, family: String },
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),
  #[error("invalid parameters: {0}")]
  InvalidParameters(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for PartMatchError {
  fn from(value: validator::ValidationErrors) -> Self {
    PartMatchError::InvalidParameters(value.to_string())
  }
}
