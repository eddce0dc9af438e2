//! CLI module - Command-line interface for Lectio
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Lectio - Bible reading tracker
/// A self-hosted reading log with a web UI
#[derive(Parser)]
#[command(name = "lectio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create a user account from the terminal
    #[command(alias = "adduser")]
    AddUser,

    /// List registered accounts
    #[command(alias = "users", alias = "ls")]
    ListUsers,
}

pub use commands::*;
