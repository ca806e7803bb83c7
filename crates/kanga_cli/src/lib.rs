//! `kanga` command layer: argument parsing, dispatch and report rendering on
//! top of `kanga_core`.

pub mod cli;
pub mod commands;
pub mod output;
pub mod paths;

use anyhow::Result;

pub fn run() -> Result<()> {
    let args = cli::parse_args();

    commands::execute(args)
}
