//! `avault completions` — generate shell completion scripts.
//!
//! Usage:
//!   avault completions bash > ~/.bash_completion.d/avault
//!   avault completions zsh

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "avault", &mut io::stdout());
    Ok(())
}
