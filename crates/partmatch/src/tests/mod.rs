use libpartmatch::prelude::*;



pub(crate) fn partmatch() -> PartMatch {
  PartMatch::embedded().unwrap()
}
