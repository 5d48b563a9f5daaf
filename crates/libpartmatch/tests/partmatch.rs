use std::fs;

use libpartmatch::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn source(value: serde_json::Value) -> Component {
  serde_json::from_value(value).unwrap()
}

#[test]
fn embedded_thick_film_resistor() {
  let partmatch = PartMatch::embedded().unwrap();

  let source = source(json!({
    "Product_Group": "Resistors",
    "Product_Family": "Thick Film Resistors",
    "Resistance (Ohm)": 100,
    "Rated_Power (W)": 0.25,
    "Size_Code": "1206",
    "Length (mm)": 3.2,
    "Height (mm)": 0.6,
    "Width (mm)": 1.6,
  }));

  let results = partmatch.find_replacements(&source, &MatchParams::default()).unwrap();

  assert!(!results.is_empty());
  assert!(results.len() <= 5);
  assert!(results.iter().all(|(candidate, _)| candidate.family() == Some("Thick Film Resistors")));
  assert!(results.windows(2).all(|pair| pair[0].1 >= pair[1].1));
  assert_eq!(results[0].0.order_code(), Some("560112116101"));
}

#[test]
fn embedded_report() {
  let partmatch = PartMatch::embedded().unwrap();

  let source = source(json!({
    "Product_Group": "Capacitors",
    "Product_Family": "Film Capacitors",
    "Capacitance (µF)": 0.27,
    "Rated_Voltage (V)": 250,
    "Operating_Temperature (°C) Minimum": -40,
    "Operating_Temperature (°C) Maximum": 105,
  }));

  let report = partmatch.report(&source, &MatchParams { top_k: 3, ..Default::default() }).unwrap();

  assert_eq!(report.suggestions.len(), 1);

  let suggestion = &report.suggestions[0];
  let outcome = |attribute: &str| suggestion.specs.iter().find(|spec| spec.attribute == attribute).map(|spec| spec.rule_outcome);

  assert_eq!(suggestion.order_code.as_deref(), Some("890324025027"));
  assert_eq!(outcome("Capacitance (µF)"), Some(RuleOutcome::Tolerated));
  assert_eq!(outcome("Rated_Voltage (V)"), Some(RuleOutcome::Good));
  assert_eq!(outcome("Operating_Temperature (°C) Minimum"), Some(RuleOutcome::Good));
  assert_eq!(outcome("Operating_Temperature (°C) Maximum"), Some(RuleOutcome::Good));
  assert_eq!(outcome("Length (mm)"), None);
}

#[test]
fn unknown_family() {
  let partmatch = PartMatch::embedded().unwrap();
  let source = source(json!({ "Product_Group": "Crystals", "Product_Family": "Quartz Crystals" }));

  assert!(matches!(
    partmatch.find_replacements(&source, &MatchParams::default()),
    Err(PartMatchError::ConfigurationMismatch { .. })
  ));
}

#[test]
fn directory_catalog_reload() {
  let dir = TempDir::new().unwrap();

  fs::write(dir.path().join("matching_rules.json"), json!({ "Resistors": { "core": { "Resistance": "=" } } }).to_string()).unwrap();
  fs::write(
    dir.path().join("mappings.json"),
    json!({ "Resistors": { "Thick Film Resistors": { "core": { "Resistance": "Resistance (Ohm)" } } } }).to_string(),
  )
  .unwrap();
  fs::write(
    dir.path().join("components.json"),
    json!([{ "Order_Code": "A", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 220 }]).to_string(),
  )
  .unwrap();

  let loader = DirectoryLoader::new(dir.path());
  let partmatch = PartMatch::from_loader(&loader).unwrap();
  let source = source(json!({ "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 220 }));

  let results = partmatch.find_replacements(&source, &MatchParams::default()).unwrap();

  assert_eq!(results.len(), 1);
  assert_eq!(results[0].1, 1.0);

  fs::write(
    dir.path().join("components.json"),
    json!([
      { "Order_Code": "A", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 220 },
      { "Order_Code": "B", "Product_Group": "Resistors", "Product_Family": "Thick Film Resistors", "Resistance (Ohm)": 210 },
    ])
    .to_string(),
  )
  .unwrap();

  partmatch.reload(&loader).unwrap();

  let results = partmatch.find_replacements(&source, &MatchParams::default()).unwrap();

  assert_eq!(results.iter().map(|(candidate, _)| candidate.order_code().unwrap()).collect::<Vec<_>>(), vec!["A", "B"]);
}
