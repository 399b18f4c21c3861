//! CLI argument definitions using clap
//!
//! Commands:
//! - tagvault list [--config <path>]
//! - tagvault show <store-key> --node <id> --taggroup <id> [--version <n|latest>]
//! - tagvault put --node <id> --taggroup <id> [--custom-type <n>] [--store-key <key>] --tag <spec>...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::snapshot::VersionKey;
use crate::store::StoreKey;

/// tagvault - inspect and edit a file-backed tag group store
#[derive(Parser, Debug)]
#[command(name = "tagvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stored tag group records
    List {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load one tag group and print it
    Show {
        /// Store key of the record
        store_key: StoreKey,

        /// Owning node id
        #[arg(long)]
        node: u32,

        /// Tag group id
        #[arg(long)]
        taggroup: u16,

        /// Snapshot to load: a version number or "latest"
        #[arg(long, default_value = "latest")]
        version: VersionKey,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a tag group, or update the one under --store-key, and save it
    Put {
        /// Owning node id
        #[arg(long)]
        node: u32,

        /// Tag group id
        #[arg(long)]
        taggroup: u16,

        /// Custom type of a new tag group
        #[arg(long, default_value_t = 0)]
        custom_type: i32,

        /// Existing record to update
        #[arg(long)]
        store_key: Option<StoreKey>,

        /// Tag as id:type:custom_type:values, values comma separated
        /// (e.g. 1:uint32:0:5,6,7 or 2:string8:0:hello)
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from([
            "tagvault",
            "show",
            "00000000-0000-4000-8000-000000000001",
            "--node",
            "10",
            "--taggroup",
            "3",
            "--version",
            "2",
        ])
        .unwrap();

        match cli.command {
            Command::Show {
                node,
                taggroup,
                version,
                config,
                ..
            } => {
                assert_eq!(node, 10);
                assert_eq!(taggroup, 3);
                assert_eq!(version, VersionKey::Specific(2));
                assert!(config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_show_defaults_to_latest() {
        let cli = Cli::try_parse_from([
            "tagvault",
            "show",
            "00000000-0000-4000-8000-000000000001",
            "--node",
            "1",
            "--taggroup",
            "1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Show {
                version: VersionKey::Latest,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_put_with_tags() {
        let cli = Cli::try_parse_from([
            "tagvault",
            "put",
            "--node",
            "10",
            "--taggroup",
            "3",
            "--custom-type",
            "7",
            "--tag",
            "1:uint32:0:5,6,7",
            "--tag",
            "2:string8:0:hi",
            "--config",
            "cfg.json",
        ])
        .unwrap();

        match cli.command {
            Command::Put {
                custom_type,
                store_key,
                tags,
                config,
                ..
            } => {
                assert_eq!(custom_type, 7);
                assert!(store_key.is_none());
                assert_eq!(tags, vec!["1:uint32:0:5,6,7", "2:string8:0:hi"]);
                assert_eq!(config, Some(PathBuf::from("cfg.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_store_key() {
        assert!(Cli::try_parse_from([
            "tagvault",
            "show",
            "not-a-key",
            "--node",
            "1",
            "--taggroup",
            "1"
        ])
        .is_err());
    }

    #[test]
    fn test_put_requires_tag() {
        assert!(Cli::try_parse_from(["tagvault", "put", "--node", "1", "--taggroup", "1"]).is_err());
    }
}
