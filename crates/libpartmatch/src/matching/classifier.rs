use serde::Serialize;

use crate::{
  matching::{Operator, Rule},
  model::{AttributeValue, HasAttributes},
};

/// Human-facing verdict for one compared attribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOutcome {
  Good,
  Tolerated,
  Failed,
}

/// One attribute of a suggestion, with the candidate and source values side
/// by side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedSpec {
  pub attribute: String,
  /// Candidate value first, source value second.
  pub values: (AttributeValue, AttributeValue),
  pub rule_outcome: RuleOutcome,
  pub operator: Operator,
}

pub(crate) fn classify(operator: Operator, candidate: &AttributeValue, source: &AttributeValue, tolerance: f64) -> Option<RuleOutcome> {
  if candidate.is_missing() || source.is_missing() {
    return None;
  }

  let outcome = match (candidate.as_number(), source.as_number()) {
    (Some(candidate), Some(source)) => match operator {
      Operator::Equal if (source - candidate).abs() / source.abs().max(1.0) < tolerance => RuleOutcome::Tolerated,
      Operator::Equal => RuleOutcome::Failed,
      Operator::AtLeast if candidate >= source => RuleOutcome::Good,
      Operator::AtMost if candidate <= source => RuleOutcome::Good,
      Operator::AtLeast | Operator::AtMost => RuleOutcome::Failed,
    },

    _ if candidate == source => RuleOutcome::Good,
    _ => RuleOutcome::Failed,
  };

  Some(outcome)
}

/// Classify every attribute bound to `rules`, in rule order. Attributes
/// missing on either side are left out.
pub(crate) fn annotate(rules: &[Rule], candidate: &impl HasAttributes, source: &impl HasAttributes, tolerance: f64) -> Vec<AnnotatedSpec> {
  rules
    .iter()
    .flat_map(|rule| rule.attributes.names().iter().map(move |name| (rule, name)))
    .filter_map(|(rule, name)| {
      let (lhs, rhs) = (candidate.attribute(name), source.attribute(name));
      let outcome = classify(rule.operator, lhs, rhs, tolerance)?;

      Some(AnnotatedSpec {
        attribute: name.clone(),
        values: (lhs.clone(), rhs.clone()),
        rule_outcome: outcome,
        operator: rule.operator,
      })
    })
    .collect()
}
