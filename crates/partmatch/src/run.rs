use libpartmatch::prelude::*;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use serde_json::Value;
use tracing::{Span, instrument};

use crate::errors::AppError;

/// Result for one source of a batch.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
  Matched { report: MatchReport },
  Failed { error: String },
}

/// Match every source of `input`, a single JSON object or an array of them.
///
/// Outcomes are returned in input order. Only an unparsable document fails
/// the whole batch.
#[instrument(name = "match_batch", skip_all)]
pub fn process(partmatch: &PartMatch, params: &MatchParams, input: &str) -> Result<Vec<Outcome>, AppError> {
  let sources = match serde_json::from_str::<Value>(input)? {
    Value::Array(sources) => sources,
    source => vec![source],
  };

  tracing::info!(sources = sources.len(), "matching batch");

  let span = Span::current();

  Ok(
    sources
      .into_par_iter()
      .enumerate()
      .map(|(index, source)| {
        let _enter = span.enter();

        match match_source(partmatch, params, source) {
          Ok(report) => {
            tracing::debug!(index, suggestions = report.suggestions.len(), "matched source");

            Outcome::Matched { report }
          }

          Err(err) => {
            tracing::warn!(index, error = %err, "could not match source");

            Outcome::Failed { error: err.to_string() }
          }
        }
      })
      .collect::<Vec<_>>(),
  )
}

fn match_source(partmatch: &PartMatch, params: &MatchParams, source: Value) -> Result<MatchReport, AppError> {
  let source = serde_json::from_value::<Component>(source)?;

  Ok(partmatch.report(&source, params)?)
}
