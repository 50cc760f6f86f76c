//! Crate-wide error type shared by the store, the fetcher and the CLI

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::asset::FetchError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("environment variable {0} is not set; cannot locate the minecraft directory")]
    MissingHome(&'static str),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),

    #[error("Minecraft {0} is not installed")]
    VersionNotInstalled(String),

    #[error("no active minecraft.jar found at {}", .0.display())]
    NoActiveJar(PathBuf),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("filesystem operation: {0}")]
    Io(#[from] std::io::Error),
}
