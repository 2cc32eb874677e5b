use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "ouroboros", version, about = "Snake on a wrapping board, in your terminal")]
pub struct Args {
    /// Render into an in-memory buffer, replay a scripted run and dump frames to the log
    #[arg(long)]
    pub debug: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for food, obstacle and power-up placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "ouroboros.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
