mod banner;
mod config;
mod downloader;
mod error;
mod logging;
mod progress;
mod urls;
mod ytdlp;

use std::path::PathBuf;

use clap::Parser;
use console::style;

use downloader::download_batch;
use error::{Error, Result};
use progress::CliProgress;
use ytdlp::YtDlp;

#[derive(Parser, Debug)]
#[command(name = "tunepull")]
#[command(version = "0.1.0")]
#[command(about = "Download the audio of a list of YouTube videos as MP3", long_about = None)]
struct Args {
    /// Text file containing YouTube watch URLs (one per line)
    file: PathBuf,

    /// Directory containing config.cfg (default: the platform config dir)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Download into this directory instead of the configured music path
    #[arg(short = 'O', long)]
    output_dir: Option<PathBuf>,

    /// Keep going when a download fails instead of stopping the batch
    #[arg(short, long)]
    keep_going: bool,

    /// Path to the yt-dlp executable
    #[arg(long, default_value = "yt-dlp")]
    ytdlp: PathBuf,

    /// Be quiet (minimal output)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    if logging::init().is_err() {
        logging::init_stderr();
        tracing::warn!("log file unavailable, logging to stderr");
    }

    if !args.quiet {
        banner::print_banner();
    }

    let music_dir = resolve_output_dir(&args)?;

    let lines = urls::load_batch_file(&args.file)?;
    let processed = urls::process_urls(&lines);

    if !processed.invalid.is_empty() {
        tracing::warn!(
            "ignoring {} invalid URLs from {}",
            processed.invalid.len(),
            args.file.display()
        );
        if !args.quiet {
            eprintln!(
                "{} The following URLs are not valid and will be ignored:",
                style("Warning:").yellow().bold()
            );
            for url in &processed.invalid {
                eprintln!("  {}", style(url).dim());
            }
        }
    }

    if processed.valid.is_empty() {
        tracing::warn!("{} contains no valid YouTube URLs", args.file.display());
        println!(
            "{} {} contains no valid YouTube URLs, nothing to do",
            style("[tunepull]").yellow().bold(),
            args.file.display()
        );
        return Ok(());
    }

    let downloader = YtDlp::new(&args.ytdlp);
    downloader.ensure_available().await?;

    if !args.quiet {
        println!(
            "{} Downloading {} tracks to {}",
            style("[tunepull]").cyan().bold(),
            style(processed.valid.len()).yellow(),
            style(music_dir.display()).yellow()
        );
    }

    let mut sink = CliProgress::new(processed.valid.len(), args.quiet);
    download_batch(
        &processed.valid,
        &music_dir,
        &downloader,
        &mut sink,
        args.keep_going,
    )
    .await?;

    Ok(())
}

fn resolve_output_dir(args: &Args) -> Result<PathBuf> {
    if let Some(dir) = &args.output_dir {
        return Ok(dir.clone());
    }
    let config_dir = args
        .config_dir
        .clone()
        .or_else(config::default_config_dir)
        .ok_or(Error::NoHomeDir)?;
    config::music_path(&config_dir)
}
