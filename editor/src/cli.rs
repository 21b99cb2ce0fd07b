//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Larder ingredient and recipe editor.
#[derive(Parser, Debug)]
#[command(
    name = "larder",
    about = "Edit ingredient and recipe data files",
    long_about = "Edit ingredient and recipe data files.\n\n\
        Data files are JSON (.json) or YAML (.yaml, .yml); the format follows\n\
        the file extension.\n\
        \n\
        EXAMPLES:\n\
          # Report entry counts and duplicate ids\n\
          larder check kitchen.yaml\n\
        \n\
          # Rewrite a YAML file as JSON\n\
          larder convert kitchen.yaml kitchen.json\n\
        \n\
          # Edit interactively (commands on stdin, `help` lists them)\n\
          larder edit kitchen.yaml",
    version
)]
pub struct Cli {
    /// Editor configuration file.
    #[arg(long, default_value = "larder.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Load a file and report counts and duplicate ids.
    ///
    /// Exits with status 1 when duplicates are found.
    Check { file: PathBuf },
    /// Load a file in one format and save it in another.
    Convert { input: PathBuf, output: PathBuf },
    /// Start an interactive editing session.
    Edit {
        /// File to open; defaults to `editor.default_file` from the config.
        file: Option<PathBuf>,
    },
}
