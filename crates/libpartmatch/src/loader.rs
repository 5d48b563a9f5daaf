use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_embed::Embed;
use serde::de::DeserializeOwned;

use crate::{
  error::PartMatchError,
  model::Component,
  rules::{RuleDefinitions, RuleMappings},
};

pub const RULES_FILE: &str = "matching_rules.json";
pub const MAPPINGS_FILE: &str = "mappings.json";
pub const COMPONENTS_FILE: &str = "components.json";

/// Source of the three documents a catalog is built from.
pub trait CatalogLoader {
  fn load_rules(&self) -> Result<RuleDefinitions, PartMatchError>;
  fn load_mappings(&self) -> Result<RuleMappings, PartMatchError>;
  fn load_components(&self) -> Result<Vec<Component>, PartMatchError>;
}

#[derive(Embed)]
#[folder = "../../assets/catalog"]
struct EmbeddedCatalog;

/// Default data set, compiled into the library.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedLoader;

impl EmbeddedLoader {
  fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, PartMatchError> {
    let file = EmbeddedCatalog::get(name).ok_or_else(|| PartMatchError::InvalidConfiguration(format!("embedded catalog does not contain {name}")))?;

    parse(name, &file.data)
  }
}

impl CatalogLoader for EmbeddedLoader {
  fn load_rules(&self) -> Result<RuleDefinitions, PartMatchError> {
    self.read(RULES_FILE)
  }

  fn load_mappings(&self) -> Result<RuleMappings, PartMatchError> {
    self.read(MAPPINGS_FILE)
  }

  fn load_components(&self) -> Result<Vec<Component>, PartMatchError> {
    self.read(COMPONENTS_FILE)
  }
}

/// Data set read from `matching_rules.json`, `mappings.json` and
/// `components.json` in a directory, on every load.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
  root: PathBuf,
}

impl DirectoryLoader {
  pub fn new(root: impl AsRef<Path>) -> DirectoryLoader {
    DirectoryLoader { root: root.as_ref().to_path_buf() }
  }

  fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, PartMatchError> {
    let path = self.root.join(name);
    let data = std::fs::read(&path).with_context(|| format!("could not read {}", path.display()))?;

    parse(name, &data)
  }
}

impl CatalogLoader for DirectoryLoader {
  fn load_rules(&self) -> Result<RuleDefinitions, PartMatchError> {
    self.read(RULES_FILE)
  }

  fn load_mappings(&self) -> Result<RuleMappings, PartMatchError> {
    self.read(MAPPINGS_FILE)
  }

  fn load_components(&self) -> Result<Vec<Component>, PartMatchError> {
    self.read(COMPONENTS_FILE)
  }
}

fn parse<T: DeserializeOwned>(name: &str, data: &[u8]) -> Result<T, PartMatchError> {
  serde_json::from_slice(data).map_err(|err| PartMatchError::InvalidConfiguration(format!("could not parse {name}: {err}")))
}
