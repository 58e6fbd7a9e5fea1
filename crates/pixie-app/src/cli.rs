use std::path::PathBuf;

use clap::Parser;

/// Pixie: chat with a kind enchanted-forest friend from your terminal.
#[derive(Parser, Debug)]
#[command(name = "pixie", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. "pixie=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Send a single message, print the conversation, and exit.
    #[arg(short, long)]
    pub message: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
