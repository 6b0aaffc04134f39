mod cli;
mod compendium;
mod hooks;
mod settings;
mod store;
mod table;
mod tui;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_tableforge(cli_args)
}
