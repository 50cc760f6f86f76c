//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::store::{self, Store};
use crate::core::paths::MinecraftPaths;
use crate::fetch::asset::{self, Fetcher, DEFAULT_HOST};

/// mvm - a version manager for minecraft.jar.
#[derive(Parser, Debug)]
#[command(name = "mvm")]
#[command(
    author,
    version,
    about,
    long_about = r#"mvm keeps every minecraft.jar you download under <minecraft>/mvm_bins,
one file per version, and copies the one you pick to <minecraft>/bin/minecraft.jar,
where the game loads it from.

Examples:
    mvm install 1.8.9
    mvm use 1.7.10
    mvm list
    mvm stash mymodpack
"#
)]
pub struct Cli {
    /// Minecraft directory to operate on.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "MVM_MINECRAFT_DIR",
        long_help = "Minecraft directory to operate on.\n\n\
Defaults to the platform location: ~/Library/Application Support/minecraft\n\
on macOS, ~/.minecraft (under HOME or APPDATA) elsewhere."
    )]
    pub dir: Option<PathBuf>,

    /// Asset host downloads are fetched from.
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "MVM_ASSET_HOST",
        default_value = DEFAULT_HOST,
        long_help = "Asset host downloads are fetched from.\n\n\
Jars are requested as <URL>/<version with dots as underscores>/minecraft.jar."
    )]
    pub host: String,

    /// HTTP timeout in seconds (0 disables the timeout).
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        env = "MVM_HTTP_TIMEOUT",
        default_value_t = 30
    )]
    pub timeout: u64,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no progress bar).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a version into the cache and make it active.
    #[command(
        long_about = "Download a version from the asset host into the cache and make it\n\
the active jar. Re-installing a version replaces the cached copy.\n\n\
Example:\n\
  mvm install 1.8.9\n"
    )]
    Install {
        /// Version to download, e.g. 1.8.9.
        #[arg(value_name = "VERSION")]
        version: String,
    },

    /// Make a previously cached version the active jar.
    #[command(
        long_about = "Copy a cached version over bin/minecraft.jar. The previous active jar\n\
is overwritten; stash it first if you want to keep it.\n\n\
Example:\n\
  mvm use 1.7.10\n"
    )]
    Use {
        /// Cached version or stash name to activate.
        #[arg(value_name = "VERSION")]
        version: String,
    },

    /// List every cached version.
    List,

    /// Save the active jar into the cache under a custom name.
    #[command(
        long_about = "Copy the current bin/minecraft.jar into the cache under NAME, so it can\n\
be restored later with `mvm use NAME`. Useful before installing over a\n\
modded jar.\n\n\
Example:\n\
  mvm stash mymodpack\n"
    )]
    Stash {
        /// Name to stash under (prompted for when omitted).
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let paths = match &cli.dir {
        Some(dir) => MinecraftPaths::at(dir.clone()),
        None => MinecraftPaths::resolve()?,
    };
    let store = Store::new(paths);

    match cli.command {
        Commands::Install { ref version } => {
            let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
            let fetcher = Fetcher::new(&cli.host, timeout)?;
            asset::run_install(&store, &fetcher, version, cli.quiet)?;
        }

        Commands::Use { ref version } => store::run_use(&store, version)?,

        Commands::List => store::run_list(&store)?,

        Commands::Stash { ref name } => {
            let name = match name {
                Some(name) => name.clone(),
                None => prompt("Name of stash: ")?,
            };
            if name.is_empty() {
                bail!("stash name cannot be empty");
            }
            store::run_stash(&store, &name)?;
        }
    }

    Ok(())
}

/// Read one line from stdin after printing `message`.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
