use crate::constants::{APP_DESCRIPTION, APP_NAME, ENV_VAR_LOG_FORMAT};
use crate::logging::LogFormat;
use clap::{Parser, Subcommand};

/// A plain-text daily journal seeded from the previous entry
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Format of diagnostic logs on stderr
    #[arg(
        long,
        value_enum,
        env = ENV_VAR_LOG_FORMAT,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create today's entry from the latest previous one and print its path
    Create,
    /// Create today's entry if needed and open it in your editor
    Write,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}
