//! Configuration loading.
//!
//! - [`file_config::FileConfig`] — raw TOML structure with defaults
//! - [`loader::ConfigLoader`] — multi-source discovery and merging

pub mod file_config;
pub mod loader;

pub use file_config::{FileBackendConfig, FileChatConfig, FileConfig, FileReplConfig};
pub use loader::ConfigLoader;
