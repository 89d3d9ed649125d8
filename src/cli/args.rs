use crate::constants::DEFAULT_SRC_DIR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cpm",
    about = "Minimal package installer for C libraries",
    long_about = "Fetches package manifests and source files straight from GitHub,\nand builds release tarballs declared by a manifest",
    version,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install a package from its GitHub manifest
    Install {
        /// Package name (owner/repo)
        name: String,

        /// Destination directory for fetched source files
        #[arg(long, value_name = "DIR", default_value = DEFAULT_SRC_DIR)]
        to: PathBuf,

        /// Log failures and keep going instead of aborting
        #[arg(long)]
        keep_going: bool,
    },

    /// Search the package index
    Search {
        /// Query words (every word must match)
        #[arg(required = true)]
        query: Vec<String>,
    },
}
