//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use named_config::{Placement, ZoneType};

use crate::settings::Settings;

/// namedctl - Inspect and edit named.conf through its typed model
#[derive(Parser, Debug)]
#[command(name = "namedctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags that override the settings file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Settings file (default: <config dir>/namedctl/config.toml)
    #[arg(long, global = true, env = "NAMEDCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Indentation of rebuilt blocks: "tab" or a number of spaces
    #[arg(long, global = true, value_parser = parse_indent)]
    pub indent: Option<String>,

    /// Where rebuilt blocks go: append or in-place
    #[arg(long, global = true, value_parser = parse_placement)]
    pub placement: Option<Placement>,

    /// Drop unrecognized statements inside modeled blocks
    #[arg(long, global = true)]
    pub drop_unknown: bool,
}

impl Overrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(indent) = &self.indent {
            settings.indent = indent.clone();
        }
        if let Some(placement) = self.placement {
            settings.placement = placement;
        }
        if self.drop_unknown {
            settings.preserve_unknown = false;
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Summarize a configuration
    Show {
        /// Path to named.conf
        file: PathBuf,

        /// Print the typed model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify that a configuration survives parsing and rebuilding
    ///
    /// Fails when the file does not render back byte for byte, or when
    /// rebuilding its modeled blocks twice gives different text.
    Check {
        /// Path to named.conf
        file: PathBuf,
    },

    /// Rebuild every modeled block in canonical layout
    ///
    /// Examples:
    ///   namedctl fmt named.conf             # Rewrite in place
    ///   namedctl fmt named.conf --dry-run   # Show the diff only
    Fmt {
        /// Path to named.conf
        file: PathBuf,

        /// Preview changes without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage zones
    Zone {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Turn recursion on or off, globally or for one view
    Recursion {
        /// Path to named.conf
        file: PathBuf,

        /// yes or no
        #[arg(value_parser = parse_yes_no, action = clap::ArgAction::Set)]
        enabled: bool,

        /// Set the override of this view instead of the global option
        #[arg(long)]
        view: Option<String>,
    },
}

/// Zone management actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ZoneAction {
    /// List zones
    List {
        /// Path to named.conf
        file: PathBuf,

        /// Only zones of this view
        #[arg(long)]
        view: Option<String>,
    },

    /// Add a zone, replacing one with the same name
    Add {
        /// Path to named.conf
        file: PathBuf,

        /// Zone name
        name: String,

        /// Zone type
        #[arg(short = 't', long = "type", default_value = "primary", value_parser = parse_zone_type)]
        zone_type: ZoneType,

        /// Zone data file
        #[arg(long)]
        zone_file: Option<String>,

        /// Add inside this view, creating it if needed
        #[arg(long)]
        view: Option<String>,
    },

    /// Remove a zone
    Remove {
        /// Path to named.conf
        file: PathBuf,

        /// Zone name
        name: String,

        /// Remove from this view instead of the top level
        #[arg(long)]
        view: Option<String>,
    },
}

fn parse_indent(value: &str) -> Result<String, String> {
    if value.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    value
        .parse::<usize>()
        .map(|n| " ".repeat(n))
        .map_err(|_| format!("expected \"tab\" or a number of spaces, got {value:?}"))
}

fn parse_placement(value: &str) -> Result<Placement, String> {
    match value {
        "append" => Ok(Placement::Append),
        "in-place" => Ok(Placement::InPlace),
        _ => Err(format!("expected append or in-place, got {value:?}")),
    }
}

fn parse_yes_no(value: &str) -> Result<bool, String> {
    match value {
        "yes" | "true" | "on" => Ok(true),
        "no" | "false" | "off" => Ok(false),
        _ => Err(format!("expected yes or no, got {value:?}")),
    }
}

fn parse_zone_type(value: &str) -> Result<ZoneType, String> {
    ZoneType::parse(value).ok_or_else(|| format!("unknown zone type {value:?}"))
}
