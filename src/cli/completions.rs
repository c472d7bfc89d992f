//! Shell completions generation.

use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use super::Cli;
use crate::error::{AdventError, Result};

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(args.shell, &mut stdout)?;
    stdout.flush().map_err(|source| AdventError::Io {
        path: "<stdout>".into(),
        source,
    })
}

/// Write the completion script for `shell`, named after the `advent` command.
pub fn write_completions(shell: Shell, out: &mut impl Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    Ok(())
}
