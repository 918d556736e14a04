//! Prompt command layer
//!
//! Bridges the interactive prompt with the service layer: clap command
//! definitions, their handlers, and the line-reading loop.

pub mod commands;
pub mod repl;

pub use commands::{handle_command, BankCommand, Outcome, PromptLine};
pub use repl::run;
