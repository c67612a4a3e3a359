//! Interactive reader command handler.

use anyhow::Result;
use coderistic_core::Catalog;
use coderistic_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: Config, catalog: Catalog) -> Result<()> {
    use anyhow::Context;

    coderistic_tui::run_reader(config, catalog)
        .await
        .context("interactive reader failed")
}

#[cfg(not(feature = "tui"))]
#[allow(clippy::unused_async)]
pub async fn run(_config: Config, _catalog: Catalog) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive reader. Use `coderistic posts` or `coderistic read <ID>`."
    )
}
