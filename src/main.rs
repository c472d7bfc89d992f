use clap::Parser;
use miette::Result;

use advent::cli::{Cli, Commands};
use advent::config::Settings;
use advent::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let Cli { config, command, .. } = cli;
    let printer = Printer::new();
    let settings = || Settings::discover(config.as_deref());

    match command {
        Commands::Check(args) => {
            let summary = advent::cli::check::run(args, &settings()?, &printer)?;
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Describe(args) => advent::cli::describe::run(args, &settings()?)?,
        Commands::Render(args) => advent::cli::render::run(args, &settings()?, &printer)?,
        Commands::Completions(args) => advent::cli::completions::run(args)?,
    }

    Ok(())
}
