use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{error::AppError, song::Song};

pub mod app;
pub mod catalog;
pub mod error;
pub mod popup;
pub mod request_queue;
pub mod selector;
pub mod song;
pub mod text_box;
pub mod tui;

/// Command-line arguments for karaoke-machine
#[derive(Parser, Debug)]
#[command(name = "karaoke-machine")]
#[command(about = "Run a karaoke night from the terminal: add songs, queue singers, play the next request")]
#[command(version)]
pub struct Args {
    /// Song to put on file at start-up, may be repeated
    #[arg(long = "song", value_name = "ARTIST|TITLE|MEDIA")]
    pub songs: Vec<Song>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, env = "KARAOKE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "karaoke_machine=trace"
    #[arg(long, env = "KARAOKE_LOG", default_value = "info")]
    pub log_level: String,
}

/// Sets up tracing to the log file. Does nothing when no log file was given.
pub fn init_logging(args: &Args) -> Result<(), AppError> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;
    let filter =
        EnvFilter::try_new(&args.log_level).map_err(|error| AppError::Logging(error.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}
