use std::{collections::HashMap, fmt};

use ahash::RandomState;
use bon::bon;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const PRODUCT_GROUP: &str = "Product_Group";
pub const PRODUCT_FAMILY: &str = "Product_Family";
pub const ORDER_CODE: &str = "Order_Code";

static MISSING: AttributeValue = AttributeValue::Missing;

// Whole values below this magnitude are written back as JSON integers.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single attribute value of a component.
///
/// Two-element numeric lists are ranges (operating temperatures, for example),
/// numeric lists of any other length are kept as plain lists. Anything that is
/// neither a number, a string nor a numeric list ends up in `Other` and never
/// takes part in numeric comparisons.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AttributeValue {
  Number(f64),
  Text(String),
  Range(f64, f64),
  List(Vec<f64>),
  Other(Value),
  #[default]
  Missing,
}

impl AttributeValue {
  pub fn is_missing(&self) -> bool {
    matches!(self, AttributeValue::Missing)
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      AttributeValue::Number(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      AttributeValue::Text(value) => Some(value),
      _ => None,
    }
  }
}

impl From<Value> for AttributeValue {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => AttributeValue::Missing,
      Value::String(text) => AttributeValue::Text(text),
      Value::Number(ref number) => match number.as_f64() {
        Some(number) => AttributeValue::Number(number),
        None => AttributeValue::Other(value),
      },
      Value::Array(ref items) => {
        let numbers = items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>();

        match numbers {
          Some(numbers) if numbers.len() == 2 => AttributeValue::Range(numbers[0], numbers[1]),
          Some(numbers) => AttributeValue::List(numbers),
          None => AttributeValue::Other(value),
        }
      }
      other => AttributeValue::Other(other),
    }
  }
}

impl From<f64> for AttributeValue {
  fn from(value: f64) -> Self {
    AttributeValue::Number(value)
  }
}

impl From<&str> for AttributeValue {
  fn from(value: &str) -> Self {
    AttributeValue::Text(value.to_string())
  }
}

impl From<(f64, f64)> for AttributeValue {
  fn from((min, max): (f64, f64)) -> Self {
    AttributeValue::Range(min, max)
  }
}

impl<'de> Deserialize<'de> for AttributeValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Value::deserialize(deserializer)?.into())
  }
}

impl Serialize for AttributeValue {
  fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
    match self {
      AttributeValue::Number(value) => serialize_number(*value, ser),
      AttributeValue::Text(value) => ser.serialize_str(value),
      AttributeValue::Range(min, max) => [JsonNumber(*min), JsonNumber(*max)].serialize(ser),
      AttributeValue::List(values) => ser.collect_seq(values.iter().copied().map(JsonNumber)),
      AttributeValue::Other(value) => value.serialize(ser),
      AttributeValue::Missing => ser.serialize_unit(),
    }
  }
}

fn serialize_number<S: Serializer>(value: f64, ser: S) -> Result<S::Ok, S::Error> {
  if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
    return ser.serialize_i64(value as i64);
  }

  ser.serialize_f64(value)
}

struct JsonNumber(f64);

impl Serialize for JsonNumber {
  fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
    serialize_number(self.0, ser)
  }
}

impl fmt::Display for AttributeValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AttributeValue::Number(value) => write!(f, "{value}"),
      AttributeValue::Text(value) => write!(f, "{value}"),
      AttributeValue::Range(min, max) => write!(f, "[{min}, {max}]"),
      AttributeValue::List(values) => write!(f, "{values:?}"),
      AttributeValue::Other(value) => write!(f, "{value}"),
      AttributeValue::Missing => write!(f, "null"),
    }
  }
}

pub trait HasAttributes {
  fn attribute(&self, key: &str) -> &AttributeValue;

  fn text(&self, key: &str) -> Option<&str> {
    self.attribute(key).as_text()
  }

  fn group(&self) -> Option<&str> {
    self.text(PRODUCT_GROUP)
  }

  fn family(&self) -> Option<&str> {
    self.text(PRODUCT_FAMILY)
  }
}

/// Flat attribute record describing one component, either the part to replace
/// or one of the catalog candidates.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Component {
  attributes: HashMap<String, AttributeValue, RandomState>,
}

impl Component {
  pub fn order_code(&self) -> Option<&str> {
    self.text(ORDER_CODE)
  }

  /// Attributes carrying a value, in no particular order.
  pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
    self.attributes.iter().filter(|(_, value)| !value.is_missing()).map(|(key, value)| (key.as_str(), value))
  }

  pub fn len(&self) -> usize {
    self.attributes().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl HasAttributes for Component {
  fn attribute(&self, key: &str) -> &AttributeValue {
    self.attributes.get(key).unwrap_or(&MISSING)
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<Component {}>", self.order_code().unwrap_or("?"))
  }
}

#[bon]
impl Component {
  #[builder]
  pub fn builder(#[builder(start_fn)] group: &str, #[builder(start_fn)] family: &str, order_code: Option<&str>, attributes: &[(&str, AttributeValue)]) -> Component {
    let mut attrs: HashMap<_, _, RandomState> = HashMap::default();

    attrs.insert(PRODUCT_GROUP.to_string(), AttributeValue::from(group));
    attrs.insert(PRODUCT_FAMILY.to_string(), AttributeValue::from(family));

    if let Some(code) = order_code {
      attrs.insert(ORDER_CODE.to_string(), AttributeValue::from(code));
    }

    for (key, value) in attributes {
      attrs.insert(key.to_string(), value.clone());
    }

    Component { attributes: attrs }
  }
}
