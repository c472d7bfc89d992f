pub mod check;
pub mod completions;
pub mod describe;
pub mod render;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// advent - tiled world definition checker and renderer
#[derive(Parser, Debug)]
#[command(name = "advent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./advent.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load definition files and report errors
    Check(check::CheckArgs),

    /// Print a loaded definition as text or JSON
    Describe(describe::DescribeArgs),

    /// Render a room of a map to PNG
    Render(render::RenderArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    /// Log filter for the verbosity flag.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["advent", "check", "data", "-vv", "--config", "alt.yaml"]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_is_well_formed() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
