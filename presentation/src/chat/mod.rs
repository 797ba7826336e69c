//! Interactive chat front-end.
//!
//! - [`repl::ChatRepl`] — the readline loop and slash commands
//! - [`stream_printer::StreamPrinter`] — live rendering of streamed turns

pub mod repl;
pub mod stream_printer;
