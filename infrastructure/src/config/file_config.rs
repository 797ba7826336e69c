//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section and field is optional; missing values fall back to the
//! defaults below.

use crate::deepseek::backend::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use deepchat_domain::UseCase;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection settings
    pub backend: FileBackendConfig,
    /// Chat behavior settings
    pub chat: FileChatConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds; 0 disables it.
    pub request_timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Identifier of the use case selected at startup.
    pub default_use_case: String,
    /// Write a JSONL transcript of the session.
    pub transcript_log: bool,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            default_use_case: "general".to_string(),
            transcript_log: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Override for the readline history file location.
    pub history_file: Option<String>,
    /// Print reasoning chunks while streaming.
    pub show_reasoning: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            show_reasoning: true,
        }
    }
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    ///
    /// Problems here never abort startup; unknown values fall back to
    /// defaults at the point of use.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if UseCase::find(&self.chat.default_use_case).is_none() {
            let valid: Vec<String> = UseCase::defaults()
                .into_iter()
                .map(|uc| uc.value)
                .collect();
            issues.push(format!(
                "chat.default_use_case: unknown value '{}' (valid: {}), falling back to 'general'",
                self.chat.default_use_case,
                valid.join(", ")
            ));
        }

        if self.backend.base_url.is_empty() {
            issues.push("backend.base_url is empty".to_string());
        }
        if self.backend.api_key_env.is_empty() {
            issues.push("backend.api_key_env is empty".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
base_url = "http://localhost:8080"
model = "deepseek-chat"
request_timeout_secs = 30

[chat]
default_use_case = "coding"
transcript_log = true

[repl]
show_reasoning = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.backend.model, "deepseek-chat");
        assert_eq!(config.backend.request_timeout_secs, 30);
        // Unspecified fields keep their defaults
        assert_eq!(config.backend.api_key_env, "DEEPSEEK_API_KEY");
        assert_eq!(config.chat.default_use_case, "coding");
        assert!(config.chat.transcript_log);
        assert!(!config.repl.show_reasoning);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.backend.model, DEFAULT_MODEL);
        assert_eq!(config.chat.default_use_case, "general");
        assert!(config.repl.show_reasoning);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_flags_unknown_use_case() {
        let config = FileConfig {
            chat: FileChatConfig {
                default_use_case: "poetry".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("poetry"));
    }
}
