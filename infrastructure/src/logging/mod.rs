//! Structured transcript logging adapters.

pub mod jsonl_logger;
