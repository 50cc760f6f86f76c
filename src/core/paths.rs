//! Platform path resolution for the minecraft directory layout
//!
//! mvm stores everything inside the stock minecraft directory: cached jars
//! live under `mvm_bins/` and the jar the game actually loads lives at
//! `bin/minecraft.jar`.

use std::env;
use std::path::{Path, PathBuf};

use crate::core::error::Error;

/// Directory holding cached jars, relative to the minecraft directory.
const CACHE_DIR_NAME: &str = "mvm_bins";

/// Directory holding the active jar, relative to the minecraft directory.
const ACTIVE_DIR_NAME: &str = "bin";

/// File name of the active jar.
pub const ACTIVE_JAR: &str = "minecraft.jar";

/// Extension of cached jars.
pub const JAR_EXT: &str = "jar";

/// Platform family, as far as the minecraft directory location cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    /// Platform family this binary was built for.
    pub fn current() -> Result<Self, Error> {
        if cfg!(target_os = "macos") {
            Ok(Self::MacOs)
        } else if cfg!(windows) {
            Ok(Self::Windows)
        } else if cfg!(unix) {
            Ok(Self::Linux)
        } else {
            Err(Error::UnsupportedPlatform(env::consts::OS))
        }
    }

    /// Environment variable naming the user profile directory.
    pub fn home_var(self) -> &'static str {
        match self {
            Self::Windows => "APPDATA",
            Self::MacOs | Self::Linux => "HOME",
        }
    }

    /// Minecraft directory under a given home directory.
    pub fn minecraft_dir(self, home: &Path) -> PathBuf {
        match self {
            Self::MacOs => home.join("Library/Application Support/minecraft"),
            Self::Windows | Self::Linux => home.join(".minecraft"),
        }
    }
}

/// Resolved directory layout every command operates on.
///
/// Constructed per invocation and passed down by value; nothing here touches
/// the filesystem. Directory creation happens lazily in the store.
#[derive(Debug, Clone)]
pub struct MinecraftPaths {
    /// `<minecraft>/mvm_bins`, one `<name>.jar` per cached version.
    pub cache_dir: PathBuf,
    /// `<minecraft>/bin`, home of the active jar.
    pub active_dir: PathBuf,
}

impl MinecraftPaths {
    /// Layout rooted at an explicit minecraft directory.
    pub fn at(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            cache_dir: base.join(CACHE_DIR_NAME),
            active_dir: base.join(ACTIVE_DIR_NAME),
        }
    }

    /// Layout at the platform's conventional minecraft directory.
    ///
    /// Reads the platform's home variable (`APPDATA` on Windows, `HOME`
    /// elsewhere); unset or empty is a configuration error.
    pub fn resolve() -> Result<Self, Error> {
        let platform = Platform::current()?;
        let var = platform.home_var();
        let home = env::var(var)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(Error::MissingHome(var))?;

        Ok(Self::at(platform.minecraft_dir(Path::new(&home))))
    }

    /// Path a cached version occupies, whether or not it exists.
    pub fn cached_jar(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{name}.{JAR_EXT}"))
    }

    /// Path of the active jar, whether or not it exists.
    pub fn active_jar(&self) -> PathBuf {
        self.active_dir.join(ACTIVE_JAR)
    }
}
