//! CLI module for Bazaar

pub mod app;
pub mod commands;

pub use app::{list_languages, ChatApp, ChatOutcome, ChatSettings};
pub use commands::{ChatArgs, Cli, Commands};
