//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for deepchat
#[derive(Parser, Debug)]
#[command(name = "deepchat")]
#[command(author, version, about = "Streaming chat client for DeepSeek reasoning models")]
#[command(long_about = r#"
deepchat talks to the DeepSeek chat-completions API and streams answers
(and the model's reasoning) into your terminal.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./deepchat.toml     Project-level config
3. ~/.config/deepchat/config.toml   Global config

The API key is read from the DEEPSEEK_API_KEY environment variable
(override the variable name with backend.api_key_env).

Example:
  deepchat "Explain the borrow checker"
  deepchat --chat
  deepchat --use-case coding "Write a binary search in Rust"
"#)]
pub struct Cli {
    /// The message to send (omit to start chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Use case preset selecting the sampling temperature
    #[arg(short, long, value_name = "VALUE")]
    pub use_case: Option<String>,

    /// Override the system prompt for this run (not persisted)
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress streaming output (print only the final answer)
    #[arg(short, long)]
    pub quiet: bool,

    /// Hide reasoning output while streaming
    #[arg(long)]
    pub no_reasoning: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
