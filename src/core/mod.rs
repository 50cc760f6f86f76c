//! Core module - Shared plumbing for every command
//!
//! This module provides:
//! - Platform path resolution for the minecraft directory
//! - The crate-wide error type
//! - Byte-level progress reporting for downloads

pub mod error;
pub mod paths;
pub mod progress;
