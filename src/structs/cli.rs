use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "prnotes")]
#[clap(about = "AI release notes for merged pull requests", long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/prnotes/config.toml)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
