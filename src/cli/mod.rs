//! CLI module - argument parsing, prompts and subcommand runners

mod args;
pub mod bin;
pub mod normalize;
mod prompts;

pub use args::{Cli, Commands};
pub use prompts::*;
