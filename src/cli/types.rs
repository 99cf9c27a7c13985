//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "starpulse")]
#[command(about = "StarPulse - fame index lookups for public figures", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .starpulse/
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the fame index profile of a person
    Search {
        /// Name of the person
        name: String,
    },

    /// Suggest full names for a partial query
    Suggest {
        /// Partial name
        partial: String,
    },

    /// Browse previously fetched profiles
    #[command(subcommand)]
    History(HistoryCommands),

    /// Interactive search session
    Interactive,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List stored profiles, most recent first
    List,

    /// Show a stored profile without contacting the backend
    Show {
        /// Name of the person (case-insensitive)
        name: String,
    },
}
