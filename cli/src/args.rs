//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Operator tool for the configuration-backed directory
#[derive(Parser, Debug)]
#[command(name = "dirctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(
        short,
        long,
        global = true,
        env = "CONFIG_PATH",
        default_value = "config.toml"
    )]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the configuration file
    Check,

    /// Authenticate a bind DN against the configuration
    Bind(BindArgs),

    /// Print the entries a search would return
    Search(SearchArgs),
}

/// Arguments for the bind command
#[derive(Parser, Debug)]
pub struct BindArgs {
    /// Distinguished name to bind as
    #[arg(short, long)]
    pub dn: String,

    /// Credential to present
    #[arg(short, long, env = "DIRCTL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Distinguished name the search runs as
    #[arg(short, long)]
    pub bind_dn: String,

    /// Search base; defaults to the configured base DN
    #[arg(long)]
    pub base: Option<String>,

    /// Object class to select (top, organizationalUnit, posixGroup, posixAccount)
    #[arg(short, long, default_value = "")]
    pub object_class: String,
}
