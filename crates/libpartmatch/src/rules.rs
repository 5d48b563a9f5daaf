use std::collections::HashMap;

use ahash::RandomState;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
  error::PartMatchError,
  matching::{Operator, Rule, RuleAttributes},
};

/// Core and optional entries of one rule section, in declaration order.
///
/// Used both for the per-group definitions (values are operators) and for the
/// per-family mappings (values are attribute names).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RuleSections {
  #[serde(default)]
  pub core: Map<String, Value>,
  #[serde(default)]
  pub optional: Map<String, Value>,
}

/// `group -> { core: { rule: operator }, optional: { ... } }`
pub type RuleDefinitions = HashMap<String, RuleSections, RandomState>;

/// `group -> family -> { core: { rule: attribute(s) }, optional: { ... } }`
pub type RuleMappings = HashMap<String, HashMap<String, RuleSections, RandomState>, RandomState>;

/// Immutable lookup table of the rules that apply to each product family.
#[derive(Clone, Debug, Default)]
pub struct RuleCatalog {
  groups: HashMap<String, HashMap<String, Vec<Rule>, RandomState>, RandomState>,
}

impl RuleCatalog {
  /// Join rule definitions with family mappings.
  ///
  /// Fails on operators that are not one of `=`, `>=` and `<=`, and on
  /// mapped values that are neither an attribute name nor a list of them.
  /// Mapping groups without a definition and mapped rule keys that are never
  /// defined are accepted, with a warning.
  pub fn build(definitions: &RuleDefinitions, mappings: &RuleMappings) -> Result<RuleCatalog, PartMatchError> {
    let mut operators: HashMap<&str, (Vec<(&str, Operator)>, Vec<(&str, Operator)>), RandomState> = HashMap::default();

    for (group, sections) in definitions {
      operators.insert(group, (parse_operators(group, &sections.core)?, parse_operators(group, &sections.optional)?));
    }

    let mut groups: HashMap<String, HashMap<String, Vec<Rule>, RandomState>, RandomState> = HashMap::default();

    for (group, families) in mappings {
      let definition = operators.get(group.as_str());

      if definition.is_none() {
        tracing::warn!(group = group.as_str(), "product group is mapped but has no rule definition");
      }

      let mut resolved: HashMap<String, Vec<Rule>, RandomState> = HashMap::default();

      for (family, mapping) in families {
        let Some((core, optional)) = definition else {
          resolved.insert(family.clone(), Vec::new());
          continue;
        };

        for (section, mapped, defined) in [("core", &mapping.core, core), ("optional", &mapping.optional, optional)] {
          for key in mapped.keys().filter(|key| !defined.iter().any(|(name, _)| *name == key.as_str())) {
            tracing::warn!(
              group = group.as_str(),
              family = family.as_str(),
              rule = key.as_str(),
              section,
              "mapped rule is not defined for this group and will never apply"
            );
          }
        }

        let mut rules = Vec::with_capacity(core.len() + optional.len());

        for (defined, mapped, is_optional) in [(core, &mapping.core, false), (optional, &mapping.optional, true)] {
          for (key, operator) in defined {
            if let Some(attributes) = parse_attributes(group, family, key, mapped.get(*key))? {
              rules.push(Rule::new(key, attributes, *operator, is_optional));
            }
          }
        }

        resolved.insert(family.clone(), rules);
      }

      groups.insert(group.clone(), resolved);
    }

    Ok(RuleCatalog { groups })
  }

  /// Rules for a (group, family) pair, core rules first, each section in
  /// declaration order. Unknown pairs resolve to no rules.
  pub fn resolve(&self, group: &str, family: &str) -> &[Rule] {
    self.groups.get(group).and_then(|families| families.get(family)).map(Vec::as_slice).unwrap_or_default()
  }

  /// Whether the mapping configuration knows about this (group, family) pair.
  pub fn is_mapped(&self, group: &str, family: &str) -> bool {
    self.groups.get(group).is_some_and(|families| families.contains_key(family))
  }

  /// Number of mapped families, across all groups.
  pub fn len(&self) -> usize {
    self.groups.values().map(HashMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

fn parse_operators<'d>(group: &str, section: &'d Map<String, Value>) -> Result<Vec<(&'d str, Operator)>, PartMatchError> {
  section
    .iter()
    .map(|(key, value)| match Operator::deserialize(value) {
      Ok(operator) => Ok((key.as_str(), operator)),
      Err(_) => Err(PartMatchError::InvalidConfiguration(format!("unknown operator {value} for rule '{key}' of group '{group}'"))),
    })
    .collect()
}

fn parse_attributes(group: &str, family: &str, key: &str, value: Option<&Value>) -> Result<Option<RuleAttributes>, PartMatchError> {
  let invalid = || PartMatchError::InvalidConfiguration(format!("invalid attribute mapping for rule '{key}' of '{group}' / '{family}'"));

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(name)) if name.is_empty() => Ok(None),
    Some(Value::String(name)) => Ok(Some(RuleAttributes::Single(name.clone()))),
    Some(Value::Array(names)) if names.is_empty() => Ok(None),
    Some(Value::Array(names)) => {
      let names = names.iter().map(|name| name.as_str().map(String::from)).collect::<Option<Vec<_>>>().ok_or_else(invalid)?;

      Ok(Some(RuleAttributes::Composite(names)))
    }
    Some(_) => Err(invalid()),
  }
}
