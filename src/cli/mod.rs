//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, RecordAction};
pub use output::format_record_list;
