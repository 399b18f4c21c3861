//! CLI module for tagvault
//!
//! Provides command-line interface for:
//! - list: Summaries of stored tag group records
//! - show: Load one tag group and print it
//! - put: Create or update a tag group and save it

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    list, list_records, load_config, put, put_tag_group, run, run_command, run_command_to, show,
    show_tag_group, TagSpec,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response_to};
