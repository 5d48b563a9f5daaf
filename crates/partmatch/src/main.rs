mod config;
mod errors;
mod run;
mod trace;

#[cfg(test)]
mod tests;

use std::io::{self, Read, Write};

use anyhow::Context;
use libpartmatch::prelude::*;

use crate::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
  let config = Config::from_env()?;
  let _guard = trace::init_tracing(&config, io::stderr());

  tracing::info!(partmatch = env!("CARGO_PKG_VERSION"), "starting");

  let partmatch = match &config.catalog_dir {
    Some(dir) => PartMatch::from_loader(&DirectoryLoader::new(dir)).with_context(|| format!("could not load catalog from {}", dir.display()))?,
    None => PartMatch::embedded().context("could not load embedded catalog")?,
  };

  let mut input = String::new();

  io::stdin().read_to_string(&mut input).context("could not read sources from standard input")?;

  let outcomes = run::process(&partmatch, &config.params(), &input)?;
  let mut stdout = io::stdout().lock();

  serde_json::to_writer(&mut stdout, &outcomes)?;
  writeln!(stdout)?;

  Ok(())
}
