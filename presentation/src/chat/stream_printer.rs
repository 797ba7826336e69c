//! Live stream printer for chat turns.
//!
//! Implements [`ChatProgressNotifier`] by writing fragments to stdout as
//! they arrive: reasoning dimmed, content plain. Keeps just enough state to
//! know whether a section header or separator is needed.

use colored::Colorize;
use deepchat_application::ChatProgressNotifier;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Prints streamed fragments as they arrive.
pub struct StreamPrinter {
    show_reasoning: bool,
    printed_reasoning: AtomicBool,
    printed_content: AtomicBool,
}

impl StreamPrinter {
    pub fn new(show_reasoning: bool) -> Self {
        Self {
            show_reasoning,
            printed_reasoning: AtomicBool::new(false),
            printed_content: AtomicBool::new(false),
        }
    }

    /// True if any fragment reached stdout; the caller then skips
    /// re-printing the finalized entry.
    pub fn printed_any(&self) -> bool {
        self.printed_content.load(Ordering::Relaxed)
            || self.printed_reasoning.load(Ordering::Relaxed)
    }
}

impl ChatProgressNotifier for StreamPrinter {
    fn on_reasoning_chunk(&self, chunk: &str) {
        if !self.show_reasoning {
            return;
        }
        if !self.printed_reasoning.swap(true, Ordering::Relaxed) {
            println!("{}", "Reasoning:".dimmed().bold());
        }
        print!("{}", chunk.dimmed());
        let _ = io::stdout().flush();
    }

    fn on_content_chunk(&self, chunk: &str) {
        // Separate the answer from the reasoning section above it
        if !self.printed_content.swap(true, Ordering::Relaxed)
            && self.printed_reasoning.load(Ordering::Relaxed)
            && self.show_reasoning
        {
            println!("\n");
        }
        print!("{}", chunk);
        let _ = io::stdout().flush();
    }

    fn on_turn_end(&self) {
        if self.printed_any() {
            println!();
        }
    }
}
