use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vgmsync")]
#[command(about = "Keep a local catalog of the VGMusic MIDI archive in sync", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file (default: $VGMSYNC_CONFIG, then ./vgmsync.toml)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Print Prometheus metrics to stdout before exiting.
    #[arg(long, global = true)]
    pub(crate) metrics: bool,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Discover sources, refresh them and save the catalog.
    Sync,

    /// Rebuild the source list from the index page and save it.
    Discover,

    /// Print entry and source counts of the saved catalog.
    Stats,

    /// Case-insensitive search over title, game, author and console.
    Search {
        /// Text to look for
        text: String,
    },
}

impl Cli {
    pub(crate) fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_is_the_default() {
        let cli = Cli::try_parse_from(["vgmsync"]).unwrap();
        assert_eq!(cli.command(), Command::Sync);
        assert!(!cli.metrics);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vgmsync", "search", "zelda", "--config", "a.toml", "--metrics"])
                .unwrap();
        assert_eq!(
            cli.command(),
            Command::Search {
                text: "zelda".to_string()
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(cli.metrics);
    }

    #[test]
    fn test_search_requires_text() {
        assert!(Cli::try_parse_from(["vgmsync", "search"]).is_err());
    }
}
