//! Cache module - Manages the mvm_bins/ jar cache and the active slot

pub mod store;
