//! Fetch module - Retrieves minecraft.jar assets from the upstream host

pub mod asset;
