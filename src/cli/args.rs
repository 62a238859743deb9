//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{Key, RenderStyle, TraversalOrder};

/// Balanced binary search tree: build, mutate, traverse, check and rebalance
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .bstree.toml
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "BSTREE_CONFIG_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demo: random tree, traversals, skew, rebalance
    Demo {
        /// Number of random keys (overrides config)
        #[arg(short, long)]
        size: Option<usize>,
        /// RNG seed for a reproducible run (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build a tree from keys, apply mutations and draw it
    Build {
        /// Input keys (duplicates are discarded)
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        keys: Vec<Key>,
        /// Keys to insert after construction
        #[arg(short, long, allow_negative_numbers = true)]
        insert: Vec<Key>,
        /// Keys to delete after the inserts
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        delete: Vec<Key>,
        /// Rebalance after all mutations
        #[arg(short, long)]
        rebalance: bool,
        /// Drawing style: pretty or termtree (overrides config)
        #[arg(long)]
        style: Option<RenderStyle>,
    },

    /// Print the visit sequence of a traversal
    Traverse {
        /// Input keys (duplicates are discarded)
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        keys: Vec<Key>,
        /// level, in, pre or post
        #[arg(short, long, default_value = "in")]
        order: TraversalOrder,
    },

    /// Look up a key and report its depth
    Find {
        /// Key to look up
        #[arg(allow_negative_numbers = true)]
        key: Key,
        /// Input keys (duplicates are discarded)
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        keys: Vec<Key>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of local
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
