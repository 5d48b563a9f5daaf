use std::fmt;

use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

pub(crate) mod classifier;
pub(crate) mod comparers;
pub(crate) mod evaluator;

pub use classifier::{AnnotatedSpec, RuleOutcome};

/// Weight applied to the score of a mandatory rule.
pub const CORE_WEIGHT: f64 = 1.0;
/// Weight applied to the score of an optional rule, always below [`CORE_WEIGHT`].
pub const OPTIONAL_WEIGHT: f64 = 0.5;
/// Score given to an optional rule when either side lacks the attribute.
pub const MISSING_OPTIONAL_SCORE: f64 = 0.5;
/// Relative difference under which an equality is shown as tolerated.
pub const DEFAULT_TOLERANCE: f64 = 0.15;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operator {
  #[serde(rename = "=")]
  Equal,
  #[serde(rename = ">=")]
  AtLeast,
  #[serde(rename = "<=")]
  AtMost,
}

impl Operator {
  pub fn as_str(&self) -> &'static str {
    match self {
      Operator::Equal => "=",
      Operator::AtLeast => ">=",
      Operator::AtMost => "<=",
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Attribute(s) a rule is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleAttributes {
  Single(String),
  /// Compared one by one, and averaged (dimensions, for example).
  Composite(Vec<String>),
}

impl RuleAttributes {
  pub fn names(&self) -> &[String] {
    match self {
      RuleAttributes::Single(name) => std::slice::from_ref(name),
      RuleAttributes::Composite(names) => names,
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
  pub key: String,
  pub attributes: RuleAttributes,
  pub operator: Operator,
  pub optional: bool,
}

impl Rule {
  pub fn new(key: &str, attributes: RuleAttributes, operator: Operator, optional: bool) -> Rule {
    Rule {
      key: key.to_string(),
      attributes,
      operator,
      optional,
    }
  }

  pub fn weight(&self) -> f64 {
    match self.optional {
      true => OPTIONAL_WEIGHT,
      false => CORE_WEIGHT,
    }
  }

  /// Normalized fitness of `candidate` against `reference` for this rule.
  pub fn score(&self, candidate: &impl crate::model::HasAttributes, reference: &impl crate::model::HasAttributes) -> f64 {
    evaluator::score(self, candidate, reference)
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<Rule {} {} on ", self.key, self.operator)?;

    match &self.attributes {
      RuleAttributes::Single(name) => write!(f, "{name}")?,
      RuleAttributes::Composite(names) => write!(f, "[{}]", names.join(", "))?,
    }

    if self.optional {
      write!(f, " (optional)")?;
    }

    write!(f, ">")
  }
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct MatchParams {
  #[serde_inline_default(5)]
  #[validate(range(min = 1, message = "at least one suggestion must be requested"))]
  pub top_k: usize,
  #[serde_inline_default(DEFAULT_TOLERANCE)]
  #[validate(range(min = 0.0, message = "tolerance cannot be negative"))]
  pub tolerance: f64,
}

impl Default for MatchParams {
  fn default() -> Self {
    MatchParams {
      top_k: 5,
      tolerance: DEFAULT_TOLERANCE,
    }
  }
}
