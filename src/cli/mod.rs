//! CLI module - Command-line interface for Watchlist
//!
//! The web server plus the out-of-band admin commands, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a personal movie list
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create the database tables
    Initdb {
        /// Drop existing tables first
        #[arg(long)]
        drop: bool,
    },

    /// Fill the database with sample movies
    Forge,

    /// Create or update the admin account
    Admin {
        /// Login username (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
