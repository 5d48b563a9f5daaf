use crate::{
  error::PartMatchError,
  loader::CatalogLoader,
  model::{Component, HasAttributes},
  rules::RuleCatalog,
};

/// Everything a match is computed against: the rules for each product family
/// and the pool of candidate components.
///
/// A catalog is never modified once built. Refreshing the data means building
/// a new one and swapping it in.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
  pub rules: RuleCatalog,
  pub components: Vec<Component>,
}

impl Catalog {
  pub fn load<L: CatalogLoader>(loader: &L) -> Result<Catalog, PartMatchError> {
    let rules = RuleCatalog::build(&loader.load_rules()?, &loader.load_mappings()?)?;
    let components = loader.load_components()?;

    let orphans = components.iter().filter(|component| component.family().is_none()).count();

    if orphans > 0 {
      tracing::warn!(count = orphans, "some candidates do not have a product family and will never be suggested");
    }

    tracing::info!(families = rules.len(), candidates = components.len(), "loaded matching catalog");

    Ok(Catalog { rules, components })
  }
}
