mod error;
mod matching;
mod model;
mod partmatch;
mod report;
mod rules;

pub mod catalog;
pub mod loader;
pub mod scoring;

#[cfg(test)]
mod tests;

pub mod prelude {
  pub use crate::catalog::Catalog;
  pub use crate::error::PartMatchError;
  pub use crate::loader::{CatalogLoader, DirectoryLoader, EmbeddedLoader};
  pub use crate::matching::{AnnotatedSpec, DEFAULT_TOLERANCE, MatchParams, Operator, Rule, RuleAttributes, RuleOutcome};
  pub use crate::model::{AttributeValue, Component, HasAttributes};
  pub use crate::partmatch::PartMatch;
  pub use crate::report::{MatchReport, SourceSpec, Suggestion};
  pub use crate::rules::{RuleCatalog, RuleDefinitions, RuleMappings, RuleSections};
}
