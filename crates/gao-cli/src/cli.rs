use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "GPU allocation optimizer", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a GPU allocation problem read from a JSON file
    Solve {
        /// Path to the input JSON document
        input: PathBuf,
        /// Path to write the resulting JSON document to
        output: PathBuf,
    },
    /// Validate an input JSON document without solving it
    Validate {
        /// Path to the input JSON document
        input: PathBuf,
    },
}
