//! Command-line interface for gigbook.

mod commands;

use clap::{Parser, Subcommand};

/// gigbook - venue, artist and show booking directory
#[derive(Parser)]
#[command(name = "gigbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Load the sample venues, artists and shows into an empty database
    Seed,

    /// Create default config file
    Init,

    /// List venues grouped by city and state
    Venues,

    /// List upcoming shows
    Shows,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["gigbook"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["gigbook", "seed"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Seed)));

        let cli = Cli::try_parse_from(["gigbook", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));

        assert!(Cli::try_parse_from(["gigbook", "daemon"]).is_err());
    }
}
