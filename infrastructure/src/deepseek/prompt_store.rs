//! File-backed system-prompt store.
//!
//! The system message survives restarts as a plain text file under the user
//! config directory. A missing file reads as an empty prompt, not an error.

use crate::deepseek::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the user-edited system prompt.
pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/deepchat/system_prompt.txt`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("deepchat").join("system_prompt.txt"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored prompt.
    pub fn load(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the prompt, creating parent directories as needed.
    pub fn store(&self, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, message)?;
        debug!("System prompt stored at {}", self.path.display());
        Ok(())
    }
}
