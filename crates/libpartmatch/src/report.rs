use serde::Serialize;

use crate::{
  matching::AnnotatedSpec,
  model::{AttributeValue, Component},
};

/// Presentation document for one matched source component.
#[derive(Clone, Debug, Serialize)]
pub struct MatchReport {
  pub source: Vec<SourceSpec>,
  pub suggestions: Vec<Suggestion>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceSpec {
  pub attribute: String,
  pub value: AttributeValue,
}

#[derive(Clone, Debug, Serialize)]
pub struct Suggestion {
  pub order_code: Option<String>,
  pub score: f64,
  pub specs: Vec<AnnotatedSpec>,
}

impl SourceSpec {
  /// Every attribute of `component` that carries a value, sorted by name.
  pub(crate) fn list(component: &Component) -> Vec<SourceSpec> {
    let mut specs = component
      .attributes()
      .map(|(attribute, value)| SourceSpec {
        attribute: attribute.to_string(),
        value: value.clone(),
      })
      .collect::<Vec<_>>();

    specs.sort_by(|lhs, rhs| lhs.attribute.cmp(&rhs.attribute));
    specs
  }
}
