//! CLI command handlers and the interactive prompt layer

pub mod commands;
pub mod prompt;

pub use commands::{add, import, list, modify};
pub use prompt::Prompter;
