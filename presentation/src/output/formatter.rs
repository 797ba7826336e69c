//! Console output formatting

use colored::Colorize;
use deepchat_domain::{ConversationEntry, Role, UseCase};

/// Formats conversation entries for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one finalized entry.
    pub fn format_entry(entry: &ConversationEntry) -> String {
        let mut out = String::new();
        match entry.role {
            Role::User => {
                out.push_str(&format!("{}\n", "You".blue().bold()));
                out.push_str(&entry.content);
            }
            Role::Assistant => {
                out.push_str(&format!("{}\n", "Assistant".green().bold()));
                if let Some(reasoning) = &entry.reasoning {
                    out.push_str(&format!("{}\n", "Reasoning:".dimmed().bold()));
                    out.push_str(&format!("{}\n\n", reasoning.dimmed()));
                }
                out.push_str(&entry.content);
            }
        }
        out
    }

    /// Format the full transcript for `/history`.
    pub fn format_history(entries: &[ConversationEntry]) -> String {
        if entries.is_empty() {
            return "No messages yet.".to_string();
        }
        entries
            .iter()
            .map(Self::format_entry)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// One line of the `/usecases` listing.
    pub fn format_use_case(use_case: &UseCase, selected: bool) -> String {
        let marker = if selected { "*" } else { " " };
        format!(
            "{} {:<12} {} (temperature {})",
            marker,
            use_case.value,
            use_case.name.bold(),
            use_case.temperature
        )
    }
}
