//! Jar store - The keyed cache under mvm_bins/ and the active slot
//!
//! The filesystem is the only source of truth: a cached version is nothing
//! but a `<name>.jar` file, and the active version is whatever currently
//! sits at `bin/minecraft.jar`. Writes are staged to a temporary file in
//! the destination directory and renamed into place, so neither the cache
//! nor the active slot ever holds a partial file.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;

use colored::Colorize;
use tempfile::NamedTempFile;

use crate::core::error::Error;
use crate::core::paths::{MinecraftPaths, JAR_EXT};

/// Keyed jar cache plus the single active slot the game loads from.
pub struct Store {
    paths: MinecraftPaths,
}

impl Store {
    pub fn new(paths: MinecraftPaths) -> Self {
        Self { paths }
    }

    /// Path a cached version occupies, whether or not it exists.
    pub fn jar_path(&self, name: &str) -> PathBuf {
        self.paths.cached_jar(name)
    }

    /// Path of the active jar.
    pub fn active_path(&self) -> PathBuf {
        self.paths.active_jar()
    }

    /// Write a cache entry named `name` from `data`, replacing any previous
    /// entry of that name.
    ///
    /// Creates the cache directory on first use. The entry appears
    /// atomically: on any write failure the staged file is discarded and no
    /// partial `<name>.jar` becomes visible.
    pub fn put(&self, name: &str, data: &mut impl Read) -> Result<(), Error> {
        fs::create_dir_all(&self.paths.cache_dir)?;

        let mut staged = NamedTempFile::new_in(&self.paths.cache_dir)?;
        io::copy(data, &mut staged)?;
        staged.persist(self.jar_path(name)).map_err(|e| e.error)?;

        Ok(())
    }

    /// Copy a cached version into the active slot, replacing the previous
    /// occupant. The cache entry itself is left untouched.
    ///
    /// The existence check runs before anything is written, so a missing
    /// version leaves the active slot exactly as it was.
    pub fn activate(&self, name: &str) -> Result<(), Error> {
        let jar = self.jar_path(name);
        if !jar.exists() {
            return Err(Error::VersionNotInstalled(name.to_string()));
        }

        fs::create_dir_all(&self.paths.active_dir)?;

        let mut source = File::open(&jar)?;
        let mut staged = NamedTempFile::new_in(&self.paths.active_dir)?;
        io::copy(&mut source, &mut staged)?;
        staged.persist(self.active_path()).map_err(|e| e.error)?;

        Ok(())
    }

    /// Names of all cached versions, in directory-enumeration order.
    ///
    /// A cache directory that does not exist yet is an empty cache, not an
    /// error. Files without the jar extension are ignored.
    pub fn list(&self) -> Result<Vec<String>, Error> {
        let entries = match fs::read_dir(&self.paths.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(JAR_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        Ok(names)
    }

    /// Stash the active jar as a cache entry named `name`.
    pub fn stash_as(&self, name: &str) -> Result<(), Error> {
        let active = self.active_path();
        if !active.exists() {
            return Err(Error::NoActiveJar(active));
        }

        let mut data = File::open(active)?;
        self.put(name, &mut data)
    }
}

/// Make a previously cached version the active jar.
pub fn run_use(store: &Store, version: &str) -> Result<(), Error> {
    store.activate(version)?;
    println!("Now using Minecraft {}", version.green());
    Ok(())
}

/// Print every cached version, one per line, sorted for stable output.
pub fn run_list(store: &Store) -> Result<(), Error> {
    let mut names = store.list()?;
    if names.is_empty() {
        println!("No versions installed.");
        return Ok(());
    }

    names.sort();
    for name in names {
        println!("{name}");
    }

    Ok(())
}

/// Save the active jar into the cache under a custom name.
pub fn run_stash(store: &Store, name: &str) -> Result<(), Error> {
    store.stash_as(name)?;
    println!(
        "Your current minecraft.jar has been stashed as {}",
        name.green()
    );
    println!("Restore it at any time by running: mvm use {name}");
    Ok(())
}
