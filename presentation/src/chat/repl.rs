//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::stream_printer::StreamPrinter;
use crate::output::formatter::ConsoleFormatter;
use colored::Colorize;
use deepchat_application::{ChatController, NoChatProgress};
use deepchat_domain::UseCase;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// Interactive chat REPL
///
/// Input is naturally disabled while a turn is in flight: the loop awaits
/// [`ChatController::submit`] before reading the next line.
pub struct ChatRepl {
    controller: ChatController,
    history_file: Option<PathBuf>,
    show_reasoning: bool,
    quiet: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: ChatController) -> Self {
        Self {
            controller,
            history_file: None,
            show_reasoning: true,
            quiet: false,
        }
    }

    /// Override the readline history file location.
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Set whether reasoning chunks are printed while streaming.
    pub fn with_reasoning(mut self, show: bool) -> Self {
        self.show_reasoning = show;
        self
    }

    /// Set whether streaming output is suppressed.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("deepchat").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              deepchat - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        let use_case = self.controller.use_case();
        println!(
            "Use case: {} (temperature {})",
            use_case.name, use_case.temperature
        );
        if self.controller.system_prompt().is_empty() {
            println!("System prompt: {}", "not set".dimmed());
        } else {
            println!("System prompt: {}", self.controller.system_prompt());
        }
        println!();
        println!("Commands:");
        println!("  /help           - Show this help");
        println!("  /usecases       - List use case presets");
        println!("  /usecase <id>   - Select a use case");
        println!("  /prompt [text]  - Show or update the system prompt");
        println!("  /history        - Show the conversation so far");
        println!("  /quit           - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return true;
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /usecases        - List use case presets");
                println!("  /usecase <id>    - Select a use case");
                println!("  /prompt [text]   - Show or update the system prompt");
                println!("  /history         - Show the conversation so far");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
            }
            "/usecases" => {
                println!();
                let selected = self.controller.use_case().value.clone();
                for use_case in UseCase::defaults() {
                    let is_selected = use_case.value == selected;
                    println!(
                        "{}",
                        ConsoleFormatter::format_use_case(&use_case, is_selected)
                    );
                }
                println!();
            }
            "/usecase" => {
                if rest.is_empty() {
                    let use_case = self.controller.use_case();
                    println!(
                        "Current use case: {} (temperature {})",
                        use_case.value, use_case.temperature
                    );
                } else {
                    match self.controller.select_use_case(rest) {
                        Ok(use_case) => println!(
                            "Use case set to {} (temperature {})",
                            use_case.name, use_case.temperature
                        ),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
            }
            "/prompt" => {
                if rest.is_empty() {
                    if self.controller.system_prompt().is_empty() {
                        println!("System prompt: {}", "not set".dimmed());
                    } else {
                        println!("System prompt: {}", self.controller.system_prompt());
                    }
                } else {
                    // The draft (rest) is still on screen if this fails, so
                    // the user can recall and retry it.
                    match self.controller.update_system_prompt(rest).await {
                        Ok(()) => println!("System prompt updated."),
                        Err(e) => eprintln!("Failed to update system prompt: {}", e),
                    }
                }
            }
            "/history" => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_history(self.controller.conversation().entries())
                );
                println!();
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }

        false
    }

    async fn process_message(&mut self, line: &str) {
        println!();

        let result = if self.quiet {
            self.controller.submit(line, &NoChatProgress).await
        } else {
            let printer = StreamPrinter::new(self.show_reasoning);
            let result = self.controller.submit(line, &printer).await;
            // A substituted error entry was never streamed; print it whole
            if let Ok(entry) = &result
                && !printer.printed_any()
            {
                println!("{}", ConsoleFormatter::format_entry(entry));
            }
            result
        };

        match result {
            Ok(entry) => {
                if self.quiet {
                    println!("{}", ConsoleFormatter::format_entry(&entry));
                }
                println!();
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
