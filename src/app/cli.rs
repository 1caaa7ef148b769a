use clap::Parser;
use std::path::PathBuf;

/// Tarang - local files and YouTube in one terminal player 🎵
#[derive(Parser, Debug)]
#[command(name = "tarang", version, about)]
pub struct Args {
    /// Audio files to queue on startup
    pub files: Vec<PathBuf>,

    /// Music directory to scan (overrides config.toml)
    #[arg(long)]
    pub music_dir: Option<PathBuf>,

    /// Region code for trending music (overrides config.toml)
    #[arg(long)]
    pub region: Option<String>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
