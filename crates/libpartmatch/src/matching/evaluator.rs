use crate::{
  matching::{
    MISSING_OPTIONAL_SCORE, Operator, Rule, RuleAttributes,
    comparers::{compare_numbers, compare_ranges},
  },
  model::{AttributeValue, HasAttributes},
};

/// Reasons a single rule could not be scored. Never escapes this module: any
/// anomaly makes the rule contribute nothing to the candidate.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub(crate) enum ScoringAnomaly {
  #[error("values are not numeric")]
  NonNumeric,
  #[error("values are not finite")]
  NonFinite,
  #[error("operator {0} cannot compare whole ranges")]
  UnsupportedRangeOperator(Operator),
}

/// Which end of a range a rule is about, read from its key.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Bound {
  Minimum,
  Maximum,
  Whole,
}

impl Bound {
  fn of(rule_key: &str) -> Bound {
    if rule_key.contains("Minimum") {
      Bound::Minimum
    } else if rule_key.contains("Maximum") {
      Bound::Maximum
    } else {
      Bound::Whole
    }
  }
}

pub(crate) fn score(rule: &Rule, candidate: &impl HasAttributes, reference: &impl HasAttributes) -> f64 {
  match try_score(rule, candidate, reference) {
    Ok(score) => score,

    Err(anomaly) => {
      tracing::trace!(rule = rule.key.as_str(), %anomaly, "rule could not be scored");

      0.0
    }
  }
}

pub(crate) fn try_score(rule: &Rule, candidate: &impl HasAttributes, reference: &impl HasAttributes) -> Result<f64, ScoringAnomaly> {
  match &rule.attributes {
    RuleAttributes::Composite(names) => Ok(score_composite(rule.operator, names, candidate, reference)),
    RuleAttributes::Single(name) => score_scalar(rule, candidate.attribute(name), reference.attribute(name)),
  }
}

fn score_composite(operator: Operator, names: &[String], candidate: &impl HasAttributes, reference: &impl HasAttributes) -> f64 {
  if names.is_empty() {
    return 0.0;
  }

  let total = names
    .iter()
    .map(|name| match (candidate.attribute(name), reference.attribute(name)) {
      (lhs, rhs) => match (lhs.as_number(), rhs.as_number()) {
        (Some(lhs), Some(rhs)) => compare_numbers(operator, lhs, rhs).unwrap_or(0.0).clamp(0.0, 1.0),
        _ => 0.0,
      },
    })
    .sum::<f64>();

  total / names.len() as f64
}

fn score_scalar(rule: &Rule, candidate: &AttributeValue, reference: &AttributeValue) -> Result<f64, ScoringAnomaly> {
  if candidate.is_missing() || reference.is_missing() {
    return Ok(match rule.optional {
      true => MISSING_OPTIONAL_SCORE,
      false => 0.0,
    });
  }

  let (lhs, rhs) = match (candidate, reference) {
    (AttributeValue::Range(c_min, c_max), AttributeValue::Range(r_min, r_max)) => match Bound::of(&rule.key) {
      Bound::Minimum => (*c_min, *r_min),
      Bound::Maximum => (*c_max, *r_max),
      Bound::Whole => return compare_ranges(rule.operator, (*c_min, *c_max), (*r_min, *r_max)),
    },

    (lhs, rhs) => match (lhs.as_number(), rhs.as_number()) {
      (Some(lhs), Some(rhs)) => (lhs, rhs),
      _ => return Err(ScoringAnomaly::NonNumeric),
    },
  };

  compare_numbers(rule.operator, lhs, rhs)
}
