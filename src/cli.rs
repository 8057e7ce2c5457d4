//! Command-line interface parsing for hubgrid
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --filter option for pre-seeding the search term and --no-refresh for
//! disabling the periodic background refresh.

use clap::Parser;

/// hubgrid - browse and search public GitHub user profiles
#[derive(Parser, Debug)]
#[command(name = "hubgrid")]
#[command(about = "Browse and search public GitHub user profiles")]
#[command(version)]
pub struct Cli {
    /// Pre-seed the search filter with a term
    ///
    /// Example:
    ///   hubgrid --filter oct     # Start with the listing filtered to "oct"
    #[arg(long, value_name = "TERM")]
    pub filter: Option<String>,

    /// Disable the periodic background refresh
    ///
    /// The startup cache check and fetch still run; only the recurring
    /// forced refresh is suppressed.
    #[arg(long)]
    pub no_refresh: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Initial search term (if specified)
    pub initial_filter: Option<String>,
    /// Whether the periodic background refresh is disabled
    pub no_refresh: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            initial_filter: cli.filter.clone(),
            no_refresh: cli.no_refresh,
        }
    }
}
