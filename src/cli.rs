use clap::Parser;
use std::path::PathBuf;

/// tableforge – build rollable tables from compendium packs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Compendium library to browse (a directory of pack .json files)
    #[arg(value_name = "LIBRARY", default_value = "packs")]
    pub library: PathBuf,

    /// Directory where created roll tables are written
    #[arg(long, value_name = "DIR", default_value = "tables")]
    pub output: PathBuf,

    /// Name for the created table (editable in the dialog)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Comma-separated pack collections to preselect (e.g. "world.monsters").
    /// Can be specified multiple times using --packs <A> --packs <B> ...
    #[arg(long, value_delimiter = ',', value_name = "COLLECTION")]
    pub packs: Vec<String>,

    /// Run in headless mode: import the packs given via --packs and exit
    /// without the TUI. Requires --packs to be specified.
    #[arg(long)]
    pub headless: bool,

    /// Force developer-mode logging on for this invocation, regardless of
    /// the saved devMode setting
    #[arg(long)]
    pub dev: bool,
}
