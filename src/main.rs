//! mvm - Minecraft version manager
//!
//! mvm keeps a local cache of minecraft.jar files keyed by version string
//! and swaps the one the game loads:
//! - `install` downloads a version and makes it active
//! - `use` switches to an already cached version
//! - `list` shows every cached version
//! - `stash` saves the currently active jar under a custom name

use anyhow::Result;
use clap::Parser;

mod cache;
mod cli;
mod core;
mod fetch;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
