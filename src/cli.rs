use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Inspect bencoded values and .torrent metainfo files
#[derive(Debug, Parser)]
#[command(name = "rusbit-meta", version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a bencoded value and print it as JSON
    Decode {
        #[arg(value_name = "BENCODED")]
        value: String,
    },
    /// Print tracker, length, info hash and piece hashes of a .torrent file
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode() {
        let cli = Cli::try_parse_from(["rusbit-meta", "decode", "5:hello"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        match cli.command {
            Command::Decode { value } => assert_eq!(value, "5:hello"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_info_with_globals() {
        let cli = Cli::try_parse_from([
            "rusbit-meta",
            "info",
            "sample.torrent",
            "--verbose",
            "--config",
            "other.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Command::Info { file } => assert_eq!(file, PathBuf::from("sample.torrent")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["rusbit-meta", "peers", "x.torrent"]).is_err());
        assert!(Cli::try_parse_from(["rusbit-meta"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
