//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - `apply` is interactive on a terminal unless the selection is given as flags

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::ViewId;
use crate::selection::SearchMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// croptree - copy a view's crop region onto views picked from a tree
#[derive(Parser, Debug)]
#[command(name = "croptree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/croptree/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the candidates come from and how they are narrowed
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Inventory JSON file describing the document's views
    #[arg(short, long, value_name = "FILE")]
    pub inventory: PathBuf,

    /// Id of the view whose crop region is copied
    #[arg(short, long, value_name = "ID", value_parser = parse_view_id)]
    pub source: ViewId,

    /// Only show views whose name matches
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Match mode for --filter and interactive search (substring, fuzzy)
    #[arg(long, value_name = "MODE")]
    pub search: Option<SearchMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree of views that can take the source's crop region
    Tree {
        #[command(flatten)]
        source: SourceArgs,

        /// Expand every group instead of only the single top-level one
        #[arg(long)]
        expand_all: bool,
    },

    /// Copy the source's crop region onto selected views
    Apply {
        #[command(flatten)]
        source: SourceArgs,

        /// Views to check by name or id (comma-separated)
        #[arg(long, value_delimiter = ',', value_name = "NAME|ID", conflicts_with = "all")]
        select: Vec<String>,

        /// Check every view that passes the filter
        #[arg(long)]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Copy crop active/visible flags from the source
        #[arg(long, value_name = "BOOL")]
        copy_visibility: Option<bool>,

        /// Copy the section box between 3D views
        #[arg(long, value_name = "BOOL")]
        copy_section_box: Option<bool>,

        /// Write the updated inventory here instead of in place
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn parse_view_id(s: &str) -> Result<ViewId, String> {
    s.trim()
        .parse::<u64>()
        .map(ViewId)
        .map_err(|_| format!("'{}' is not a view id", s))
}
