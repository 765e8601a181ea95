//! Core types for postgen
//!
//! Configuration loading and the error type shared by the other crates.

pub mod config;
pub mod error;

pub use config::{
    CollectionConfig, PostgenConfig, PostmanSettings, SourceConfig, WorkspaceTarget,
};
pub use error::{Error, Result};
