//! Full-screen terminal reader for Coderistic.

pub mod common;
pub mod effects;
pub mod events;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;
pub mod views;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use coderistic_core::Catalog;
use coderistic_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive reader until the user quits.
pub async fn run_reader(config: Config, catalog: Catalog) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The reader requires a terminal.\n\
             Use `coderistic posts` or `coderistic read <ID>` for non-interactive output."
        );
    }

    let mut err = stderr();
    writeln!(err, "Coderistic")?;
    writeln!(
        err,
        "{} posts · {} · {}",
        catalog.posts().len(),
        config.language.display_name(),
        config.theme.display_name()
    )?;
    err.flush()?;

    tracing::info!(posts = catalog.posts().len(), "Starting reader");
    let mut runtime = TuiRuntime::new(config, catalog)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
