//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::PrintStyle;

/// Build, query and rebalance binary search trees
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Tree drawing style (default from config: odin)
    #[arg(short, long, value_enum, global = true)]
    pub style: Option<PrintStyle>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from values, apply edits and report its shape
    Show(ShowArgs),

    /// Run the scripted demonstration on random trees
    Demo(DemoArgs),

    /// Print effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Initial values (sorted and deduplicated before building)
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<i64>,

    /// Insert a value after building (repeatable)
    #[arg(long = "insert", value_name = "VALUE", allow_negative_numbers = true)]
    pub inserts: Vec<i64>,

    /// Delete a value after the inserts (repeatable)
    #[arg(long = "delete", value_name = "VALUE", allow_negative_numbers = true)]
    pub deletes: Vec<i64>,

    /// Rebalance after all edits
    #[arg(long)]
    pub rebalance: bool,

    /// Report the depth of a value (repeatable)
    #[arg(long = "find", value_name = "VALUE", allow_negative_numbers = true)]
    pub finds: Vec<i64>,
}

#[derive(Args, Debug, Default)]
pub struct DemoArgs {
    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of random values per tree
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Smallest random value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Largest random value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Wait for Enter between phases
    #[arg(short, long)]
    pub interactive: bool,
}
