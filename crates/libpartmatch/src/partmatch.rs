use std::sync::{Arc, PoisonError, RwLock};

use tracing::instrument;
use validator::Validate;

use crate::{
  catalog::Catalog,
  error::PartMatchError,
  loader::{CatalogLoader, EmbeddedLoader},
  matching::{MatchParams, Rule, classifier},
  model::{Component, HasAttributes},
  report::{MatchReport, SourceSpec, Suggestion},
  scoring,
};

const MISSING_NAME: &str = "<missing>";

/// The main entrypoint for using the partmatch library.
///
/// `PartMatch` ranks the candidates of its catalog as replacements for a
/// source component, using the rules configured for the source's product
/// family.
///
/// # Examples
///
/// ```rust
/// # use libpartmatch::prelude::*;
/// let partmatch = PartMatch::embedded().unwrap();
///
/// let source = Component::builder("Resistors", "Thick Film Resistors")
///   .attributes(&[("Resistance (Ohm)", 100.0.into()), ("Rated_Power (W)", 0.25.into())])
///   .build();
///
/// for (candidate, score) in partmatch.find_replacements(&source, &MatchParams::default()).unwrap() {
///   println!("{candidate}: {score}");
/// }
/// ```
///
/// This struct can be safely cloned and sent across thread boundaries. All
/// clones share the same catalog.
#[derive(Clone, Debug)]
pub struct PartMatch {
  catalog: Arc<RwLock<Arc<Catalog>>>,
}

impl PartMatch {
  pub fn new(catalog: Catalog) -> PartMatch {
    PartMatch {
      catalog: Arc::new(RwLock::new(Arc::new(catalog))),
    }
  }

  /// Build an instance over the data set compiled into the library.
  pub fn embedded() -> Result<PartMatch, PartMatchError> {
    PartMatch::from_loader(&EmbeddedLoader)
  }

  pub fn from_loader<L: CatalogLoader>(loader: &L) -> Result<PartMatch, PartMatchError> {
    Ok(PartMatch::new(Catalog::load(loader)?))
  }

  /// Current catalog.
  ///
  /// The returned snapshot is not affected by later reloads.
  pub fn catalog(&self) -> Arc<Catalog> {
    self.catalog.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Load a new catalog and swap it in for every clone of this instance.
  ///
  /// If loading fails, the current catalog is kept.
  pub fn reload<L: CatalogLoader>(&self, loader: &L) -> Result<(), PartMatchError> {
    let catalog = Catalog::load(loader)?;

    *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);

    Ok(())
  }

  /// Ranked replacement candidates for `source`, best first.
  #[instrument(name = "find_replacements", skip_all, fields(group = source.group(), family = source.family()))]
  pub fn find_replacements(&self, source: &Component, params: &MatchParams) -> Result<Vec<(Component, f64)>, PartMatchError> {
    check_params(params)?;

    let catalog = self.catalog();
    let rules = rules_for(&catalog, source)?;

    Ok(scoring::rank(rules, source, &catalog.components, params.top_k).into_iter().map(|(candidate, score)| (candidate.clone(), score)).collect())
  }

  /// Ranked replacement candidates for `source`, with every compared
  /// attribute classified.
  #[instrument(name = "match_report", skip_all, fields(group = source.group(), family = source.family()))]
  pub fn report(&self, source: &Component, params: &MatchParams) -> Result<MatchReport, PartMatchError> {
    check_params(params)?;

    let catalog = self.catalog();
    let rules = rules_for(&catalog, source)?;

    let suggestions = scoring::rank(rules, source, &catalog.components, params.top_k)
      .into_iter()
      .map(|(candidate, score)| Suggestion {
        order_code: candidate.order_code().map(String::from),
        score,
        specs: classifier::annotate(rules, candidate, source, params.tolerance),
      })
      .collect();

    Ok(MatchReport {
      source: SourceSpec::list(source),
      suggestions,
    })
  }
}

fn check_params(params: &MatchParams) -> Result<(), PartMatchError> {
  params.validate()?;

  if !params.tolerance.is_finite() {
    return Err(PartMatchError::InvalidParameters("tolerance must be a finite number".into()));
  }

  Ok(())
}

fn rules_for<'c>(catalog: &'c Catalog, source: &Component) -> Result<&'c [Rule], PartMatchError> {
  match (source.group(), source.family()) {
    (Some(group), Some(family)) if catalog.rules.is_mapped(group, family) => Ok(catalog.rules.resolve(group, family)),

    (group, family) => Err(PartMatchError::ConfigurationMismatch {
      group: group.unwrap_or(MISSING_NAME).to_string(),
      family: family.unwrap_or(MISSING_NAME).to_string(),
    }),
  }
}
