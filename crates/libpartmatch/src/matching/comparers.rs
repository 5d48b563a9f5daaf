use crate::matching::{Operator, evaluator::ScoringAnomaly};

#[inline]
fn finite(value: f64) -> Result<f64, ScoringAnomaly> {
  match value.is_finite() {
    true => Ok(value),
    false => Err(ScoringAnomaly::NonFinite),
  }
}

/// Closeness of two numbers, relative to the reference.
///
/// The denominator never goes below 1 so that values around zero do not blow
/// the difference up.
#[inline]
pub(crate) fn closeness(candidate: f64, reference: f64) -> Result<f64, ScoringAnomaly> {
  let score = 1.0 - (finite(candidate)? - finite(reference)?).abs() / reference.abs().max(1.0);

  Ok(finite(score)?.clamp(0.0, 1.0))
}

#[inline]
pub(crate) fn at_least(candidate: f64, reference: f64) -> Result<f64, ScoringAnomaly> {
  let (candidate, reference) = (finite(candidate)?, finite(reference)?);

  if candidate >= reference {
    return Ok(1.0);
  }

  Ok(finite(candidate / reference.max(1.0))?.clamp(0.0, 1.0))
}

#[inline]
pub(crate) fn at_most(candidate: f64, reference: f64) -> Result<f64, ScoringAnomaly> {
  let (candidate, reference) = (finite(candidate)?, finite(reference)?);

  if candidate <= reference {
    return Ok(1.0);
  }

  Ok(finite(reference / candidate.max(1.0))?.clamp(0.0, 1.0))
}

pub(crate) fn compare_numbers(operator: Operator, candidate: f64, reference: f64) -> Result<f64, ScoringAnomaly> {
  match operator {
    Operator::Equal => closeness(candidate, reference),
    Operator::AtLeast => at_least(candidate, reference),
    Operator::AtMost => at_most(candidate, reference),
  }
}

/// Whole-range comparison, used when a rule does not say which bound it is
/// about.
pub(crate) fn compare_ranges(operator: Operator, (c_min, c_max): (f64, f64), (r_min, r_max): (f64, f64)) -> Result<f64, ScoringAnomaly> {
  let score = match operator {
    Operator::AtLeast if finite(c_max)? >= finite(r_max)? => return Ok(1.0),
    Operator::AtLeast => (c_max - r_max) / r_max.max(1.0),

    Operator::AtMost if finite(c_min)? <= finite(r_min)? => return Ok(1.0),
    Operator::AtMost => (r_min - c_min) / r_min.max(1.0),

    Operator::Equal => return Err(ScoringAnomaly::UnsupportedRangeOperator(operator)),
  };

  Ok(finite(score)?.clamp(0.0, 1.0))
}
