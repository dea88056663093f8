//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all
//! subcommands. Levels, techs and entities are not marked required so that
//! configured levels can fill in and empty inputs get descriptive errors.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::{TechAliasParseError, TechAliases};

/// Harvest - resolve entity declarations into ordered source files
#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./harvest.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ordered files for a declaration
    Resolve(ResolveArgs),

    /// Print the ordered dependency closure (cells) for a declaration
    Closure(ResolveArgs),

    /// Concatenate the ordered files
    Cat {
        #[command(flatten)]
        args: ResolveArgs,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Level directory, highest priority first (repeatable; default from config)
    #[arg(short = 'l', long = "level", value_name = "PATH")]
    pub levels: Vec<String>,

    /// Technology to build (repeatable or comma separated)
    #[arg(short = 't', long = "tech", value_name = "TECH", value_delimiter = ',')]
    pub techs: Vec<String>,

    /// Tech alias, e.g. `js=js,vanilla.js` (repeatable; overrides config)
    #[arg(long = "alias", value_name = "TECH=ALIAS[,ALIAS]", value_parser = parse_alias)]
    pub aliases: Vec<(String, Vec<String>)>,

    /// Follow symbolic links while walking levels
    #[arg(long)]
    pub follow_links: bool,

    /// Entities to resolve: `block`, `block__elem`, `block_mod_val`, optionally `.tech`
    #[arg(value_name = "ENTITY")]
    pub entities: Vec<String>,
}

impl ResolveArgs {
    /// Aliases given on the command line.
    pub fn tech_aliases(&self) -> TechAliases {
        let mut aliases = TechAliases::new();
        for (tech, list) in &self.aliases {
            aliases.insert(tech.clone(), list.clone());
        }
        aliases
    }
}

fn parse_alias(raw: &str) -> Result<(String, Vec<String>), TechAliasParseError> {
    TechAliases::parse_entry(raw)
}
