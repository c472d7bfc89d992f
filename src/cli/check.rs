//! Check command implementation.
//!
//! Loads every definition file it is given, following references, and
//! reports each result. Directories are walked for `.txt` files; walked
//! files that do not look like definitions are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use log::debug;
use walkdir::WalkDir;

use crate::config::Settings;
use crate::error::Result;
use crate::loader::{detect_kind, LoadOptions, Loader};
use crate::output::{plural, Printer};

/// File extension of definition files found by walking directories.
const DEFINITION_EXT: &str = "txt";

/// Load definition files and report errors
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    pub paths: Vec<PathBuf>,
}

/// Counts reported by a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub loaded: usize,
    pub failed: usize,
}

pub fn run(args: CheckArgs, settings: &Settings, printer: &Printer) -> Result<CheckSummary> {
    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };

    let loader = Loader::new(LoadOptions::from_settings(settings));
    let mut summary = CheckSummary::default();

    for file in collect_files(&roots) {
        match loader.load_any(&file) {
            Ok(loaded) => {
                summary.loaded += 1;
                printer.loaded(&loaded, &file);
            }
            Err(err) => {
                summary.failed += 1;
                printer.failed(&err);
            }
        }
    }

    let message = format!(
        "{} loaded, {} failed",
        plural(summary.loaded, "file", "files"),
        summary.failed
    );
    if summary.failed == 0 {
        printer.success("Finished", &message);
    } else {
        printer.warning("Finished", &message);
    }

    Ok(summary)
}

/// Expand the given paths into the files to check, in a stable order.
///
/// Files named directly are always checked. Files found by walking must
/// have the definition extension and a recognisable kind.
fn collect_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some(DEFINITION_EXT) {
                continue;
            }
            if looks_like_definition(path) {
                files.push(path.to_path_buf());
            } else {
                debug!("Skipping {}: not a definition file", path.display());
            }
        }
    }

    files
}

fn looks_like_definition(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|source| detect_kind(&source).is_some())
        .unwrap_or(false)
}
