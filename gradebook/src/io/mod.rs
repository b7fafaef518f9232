//! Filesystem side of the gradebook: the persisted document and config.

pub mod config;
pub mod store;
