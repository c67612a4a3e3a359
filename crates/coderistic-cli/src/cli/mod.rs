//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use coderistic_core::config::Config;
use coderistic_core::{Catalog, Language, Theme, logging};

mod commands;

#[derive(Parser)]
#[command(name = "coderistic")]
#[command(version)]
#[command(about = "A digital sanctuary for engineering philosophy, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Display language (en, kh); overrides the config file
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Color theme (dark, heavenly, light); overrides the config file
    #[arg(long, global = true)]
    theme: Option<Theme>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the essays in the catalog
    Posts,
    /// Print one essay as plain text
    Read {
        /// The post ID (see `coderistic posts`)
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Ask the sage for a pearl of wisdom
    Wisdom,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        lang,
        theme,
    } = cli;

    // Config commands must work even when the existing file is broken.
    let command = match command {
        Some(Commands::Config { command }) => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
            };
        }
        other => other,
    };

    let mut config = Config::load().context("load config")?;
    if let Some(lang) = lang {
        config.language = lang;
    }
    if let Some(theme) = theme {
        config.theme = theme;
    }

    // Logging is best-effort: a read-only home must not stop the reader.
    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let catalog = Catalog::resolve(config.catalog_path().as_deref()).context("load catalog")?;

    match command {
        None => commands::reader::run(config, catalog).await,
        Some(Commands::Posts) => {
            commands::posts::list(&catalog, config.language);
            Ok(())
        }
        Some(Commands::Read { id }) => commands::read::run(&config, &catalog, &id).await,
        Some(Commands::Wisdom) => commands::wisdom::run(&config).await,
        Some(Commands::Config { .. }) => Ok(()),
    }
}
