//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::{Cli, Commands};
pub use output::{format_entry, format_entry_list, Notification};
pub use prompt::{AssumeYes, Confirm, StdinConfirm};
