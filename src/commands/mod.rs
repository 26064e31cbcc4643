//! Command handlers for the textimg binary.

pub mod completions;
pub mod env;
pub mod render;

use anyhow::Result;

use textimg::cli::Cli;

/// Dispatch to the handler selected by the command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        return completions::handle(shell);
    }
    if cli.environments {
        return env::handle();
    }
    render::handle(cli)
}
