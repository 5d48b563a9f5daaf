use std::time::Instant;

use itertools::Itertools;
use metrics::histogram;
use tracing::{Span, instrument};

use crate::{
  matching::Rule,
  model::{Component, HasAttributes},
};

/// Score every candidate of the source's family and keep the `top_k` best.
///
/// Candidates from other families are never considered. The aggregate score
/// is the sum of each rule's score times its weight, and is not normalized.
/// Equal scores keep their order from `candidates`.
#[instrument(name = "rank_candidates", skip_all, fields(family = source.family(), rules = rules.len(), top_k = top_k))]
pub fn rank<'c>(rules: &[Rule], source: &Component, candidates: &'c [Component], top_k: usize) -> Vec<(&'c Component, f64)> {
  let Some(family) = source.family() else {
    return Vec::new();
  };

  let span = Span::current();
  let then = Instant::now();

  tracing::debug!(rules = %rules.iter().join(", "), "applying rules");

  let mut results = candidates
    .iter()
    .filter(|candidate| candidate.family() == Some(family))
    .map(|candidate| {
      let _enter = span.enter();
      let score = rules.iter().map(|rule| rule.score(candidate, source) * rule.weight()).sum::<f64>();

      tracing::debug!(candidate = %candidate, score, "computed score");

      histogram!("partmatch_scoring_scores").record(score);

      (candidate, score)
    })
    .collect::<Vec<_>>();

  results.sort_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs));
  results.truncate(top_k);

  histogram!("partmatch_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

  results
}
