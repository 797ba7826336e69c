//! Presentation layer for deepchat
//!
//! CLI definition, the interactive chat REPL, the live stream printer and
//! console output formatting. There is no markdown rendering; transcripts
//! print as plain colored text.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::repl::ChatRepl;
pub use chat::stream_printer::StreamPrinter;
pub use cli::commands::Cli;
pub use output::formatter::ConsoleFormatter;
