//! toicu - Convert the standalone MessageFormat 2 sources to ICU ones
//!
//! toicu:
//! - Copies the source tree to a fresh output directory
//! - Rewrites the package token in every source file of the copy
//! - Prints the diff commands to compare the result against an ICU checkout

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
