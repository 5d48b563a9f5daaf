use std::{
  env::{self, VarError},
  fmt::Display,
  path::PathBuf,
  str::FromStr,
};

use libpartmatch::prelude::*;
use validator::Validate;

use crate::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,

  // Catalog
  pub catalog_dir: Option<PathBuf>,

  // Match settings
  pub top_k: usize,
  pub tolerance: f64,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      catalog_dir: None,
      top_k: MatchParams::default().top_k,
      tolerance: DEFAULT_TOLERANCE,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      catalog_dir: env::var("CATALOG_DIR").ok().filter(|dir| !dir.is_empty()).map(PathBuf::from),
      top_k: parse_env("MATCH_TOP_K", MatchParams::default().top_k)?,
      tolerance: parse_env("MATCH_TOLERANCE", DEFAULT_TOLERANCE)?,
    };

    if let Err(err) = config.params().validate() {
      return Err(AppError::ConfigError(format!("invalid match settings: {err}")));
    }

    if !config.tolerance.is_finite() {
      return Err(AppError::ConfigError("MATCH_TOLERANCE must be a finite number".into()));
    }

    Ok(config)
  }

  pub fn params(&self) -> MatchParams {
    MatchParams {
      top_k: self.top_k,
      tolerance: self.tolerance,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => Ok(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}")).into()),
    },
  }
}
