//! Describe command implementation.
//!
//! Loads one definition file and prints its describe tree to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::describe::{Describe, Node};
use crate::error::{AdventError, Result};
use crate::loader::{LoadOptions, Loaded, Loader};
use crate::world::World;

/// Print a loaded definition as text or JSON
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Definition file to describe
    pub file: PathBuf,

    /// Print JSON instead of the text layout
    #[arg(long)]
    pub json: bool,

    /// For maps, describe the world started at the entrance instead
    #[arg(long)]
    pub world: bool,
}

pub fn run(args: DescribeArgs, settings: &Settings) -> Result<()> {
    let loader = Loader::new(LoadOptions::from_settings(settings));
    let node = match loader.load_any(&args.file)? {
        Loaded::Map(map) if args.world => World::new(map)?.describe(),
        loaded => loaded.describe(),
    };

    let text = render(&node, args.json).map_err(|e| stdout_error(e.into()))?;
    io::stdout().lock().write_all(text.as_bytes()).map_err(stdout_error)
}

fn render(node: &Node, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(node).map(|s| s + "\n")
    } else {
        Ok(node.to_text())
    }
}

fn stdout_error(source: io::Error) -> AdventError {
    AdventError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}
