use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "futurama-roster")]
#[command(about = "Browse the Futurama character roster from futuramaapi.com")]
#[command(version)]
pub struct Cli {
    /// Run in CLI mode (print the roster and exit, no interactive TUI)
    #[arg(long)]
    pub cli: bool,

    /// Log file path (overrides FUTURAMA_LOG_FILE)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
