//! VoyageLog CLI — render the voyage journal pages from the command line.
//!
//! Loads the chapter list, resolves the chapter named by a page URL, and
//! prints the resulting HTML.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
