//! CLI module - Command-line interface for sisdesk
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sisdesk - Student information admin panel
#[derive(Parser)]
#[command(name = "sisdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web dashboard (default)
    #[command(alias = "web")]
    Serve,

    /// Create an operator account
    CreateUser {
        /// Login name
        username: String,
        /// Plain-text password, hashed before storage
        #[arg(long)]
        password: String,
    },

    /// Print one page of the student roster
    #[command(alias = "ls")]
    List {
        /// Search name, matric number, department or faculty
        #[arg(long)]
        q: Option<String>,
        /// Exact gender filter
        #[arg(long)]
        gender: Option<String>,
        #[arg(long, default_value = "1")]
        page: u64,
        #[arg(long)]
        per_page: Option<u64>,
    },

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,
}

pub use commands::*;
