use std::{
  io,
  sync::{Arc, Mutex, PoisonError},
};

use serde_json::json;

use crate::{
  error::PartMatchError,
  loader::CatalogLoader,
  matching::{Operator, Rule, RuleAttributes},
  model::{AttributeValue, Component},
  rules::{RuleDefinitions, RuleMappings},
};

pub(crate) fn resistor(attributes: &[(&str, AttributeValue)]) -> Component {
  Component::builder("Resistors", "Thick Film Resistors").attributes(attributes).build()
}

/// Run `f` under a subscriber recording every event, down to trace level.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
  let buffer = LogBuffer::default();
  let writer = buffer.clone();

  let subscriber = tracing_subscriber::fmt()
    .with_max_level(tracing::Level::TRACE)
    .with_ansi(false)
    .with_writer(move || writer.clone())
    .finish();

  let output = tracing::subscriber::with_default(subscriber, f);
  let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap_or_else(PoisonError::into_inner)).to_string();

  (output, logs)
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);

    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub(crate) fn thick_film_rules() -> Vec<Rule> {
  vec![
    Rule::new("Resistance", RuleAttributes::Single("Resistance (Ohm)".into()), Operator::Equal, false),
    Rule::new("Power Rating", RuleAttributes::Single("Rated_Power (W)".into()), Operator::AtLeast, false),
    Rule::new("Dimensions", RuleAttributes::Composite(vec!["Size_Code".into(), "Length (mm)".into()]), Operator::Equal, false),
    Rule::new("Tolerance", RuleAttributes::Single("Tolerance (%)".into()), Operator::AtMost, true),
  ]
}

/// In-memory loader over a small resistor data set.
#[derive(Clone, Debug)]
pub(crate) struct FixtureLoader {
  pub(crate) rules: RuleDefinitions,
  pub(crate) mappings: RuleMappings,
  pub(crate) components: Vec<Component>,
}

impl Default for FixtureLoader {
  fn default() -> Self {
    let rules = json!({
      "Resistors": {
        "core": { "Resistance": "=", "Power Rating": ">=", "Dimensions": "=" },
        "optional": { "Tolerance": "<=" }
      }
    });

    let mappings = json!({
      "Resistors": {
        "Thick Film Resistors": {
          "core": { "Resistance": "Resistance (Ohm)", "Power Rating": "Rated_Power (W)", "Dimensions": ["Size_Code", "Length (mm)"] },
          "optional": { "Tolerance": "Tolerance (%)" }
        },
        "Metal Plate Resistors": {
          "core": { "Resistance": "Resistance (Ohm)" },
          "optional": {}
        }
      }
    });

    let components = json!([
      { "Order_Code": "TF-100", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 100, "Rated_Power (W)": 0.25, "Size_Code": "1206", "Length (mm)": 3.2, "Tolerance (%)": 1 },
      { "Order_Code": "TF-105", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 105, "Rated_Power (W)": 0.125, "Size_Code": "1206", "Length (mm)": 3.1, "Tolerance (%)": 5 },
      { "Order_Code": "TF-470", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 470, "Rated_Power (W)": 0.25, "Size_Code": "0603", "Length (mm)": 1.6 },
      { "Order_Code": "MP-100", "Product_Group": "Resistors", "Product_Family": "Metal Plate Resistors", "Resistance (Ohm)": 100 },
    ]);

    FixtureLoader {
      rules: serde_json::from_value(rules).unwrap(),
      mappings: serde_json::from_value(mappings).unwrap(),
      components: serde_json::from_value(components).unwrap(),
    }
  }
}

impl CatalogLoader for FixtureLoader {
  fn load_rules(&self) -> Result<RuleDefinitions, PartMatchError> {
    Ok(self.rules.clone())
  }

  fn load_mappings(&self) -> Result<RuleMappings, PartMatchError> {
    Ok(self.mappings.clone())
  }

  fn load_components(&self) -> Result<Vec<Component>, PartMatchError> {
    Ok(self.components.clone())
  }
}
