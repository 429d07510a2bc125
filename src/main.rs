use anyhow::{Context, Result};
use clap::Parser;
use karaoke_machine::{app::App, error::AppError, init_logging, tui, Args};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args).context("Failed to set up logging")?;
    info!(preloaded = args.songs.len(), "starting karaoke machine");

    let mut app = App::with_songs(args.songs);

    let mut terminal = tui::init()
        .map_err(AppError::from)
        .context("Failed to initialize the terminal")?;
    let app_result = app.run(&mut terminal).await;
    tui::restore()
        .map_err(AppError::from)
        .context("Failed to restore the terminal")?;
    app_result.context("Terminal input failed")?;

    match app.pending_requests() {
        0 => println!("Peace out!"),
        pending => println!("Peace out! {pending} requests were still in the queue."),
    }
    Ok(())
}
