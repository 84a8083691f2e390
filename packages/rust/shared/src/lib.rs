//! Shared types, error model, and configuration for VoyageLog.
//!
//! This crate is the foundation depended on by all other VoyageLog crates.
//! It provides:
//! - [`VoyageLogError`] — the unified error type
//! - Domain types ([`ChapterRecord`])
//! - Configuration ([`AppConfig`], [`Routing`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, Routing, SiteConfig, SourceConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, VoyageLogError};
pub use types::ChapterRecord;
