use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::config::Config;
use crate::console::{Prompt, StdConsole, confirm};
use crate::domain::track::TrackList;
use crate::download::{
    DownloadOrchestrator, OutputSummary, ThreadPacer, YtDlp, check_tools, prepare_output_dir,
    summarize_output,
};
use crate::http::{Fetch, HttpClient};
use crate::strategy::{ExtractionOutcome, StrategyRunner};

#[derive(Parser)]
#[command(name = "tracklift")]
#[command(version = "0.1")]
#[command(about = "Turns track, album and playlist links into downloaded audio")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a link and download every track (default)
    Download {
        /// Track, album or playlist link. Asked for when missing
        url: Option<String>,
        /// Do not ask for confirmation before downloading
        #[arg(short, long)]
        yes: bool,
    },
    /// Resolve a link and print its tracks
    Resolve { url: String },
    /// Check that yt-dlp and ffmpeg are installed
    Check,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command.unwrap_or(Commands::Download {
        url: None,
        yes: false,
    }) {
        Commands::Check => {
            if !report_tools(&cfg).downloader {
                bail!("yt-dlp is required");
            }
        }

        Commands::Resolve { url } => {
            let outcome = resolve(&cfg, &url)?;
            print_tracks(&outcome.tracks);
        }

        Commands::Download { url, yes } => {
            let tools = report_tools(&cfg);
            if !tools.downloader {
                bail!("yt-dlp is required to download");
            }
            download(&cfg, url, yes, tools.converter)?;
        }
    }

    Ok(())
}

struct Tools {
    downloader: bool,
    converter: bool,
}

/// Logs the state of external tools
fn report_tools(cfg: &Config) -> Tools {
    let (yt_dlp, ffmpeg) = check_tools(&cfg.download);

    match &ffmpeg.version {
        Some(version) => log::info!("FFmpeg available ({version}), audio conversion enabled"),
        None => log::warn!(
            "FFmpeg not found at {}, files will keep their original format",
            ffmpeg.path.display()
        ),
    }
    match &yt_dlp.version {
        Some(version) => log::info!("yt-dlp ready ({version})"),
        None => log::error!("yt-dlp not found at {}", yt_dlp.path.display()),
    }

    Tools {
        downloader: yt_dlp.is_available(),
        converter: ffmpeg.is_available(),
    }
}

fn resolve(cfg: &Config, url: &str) -> anyhow::Result<ExtractionOutcome> {
    let fetch: Rc<dyn Fetch> = Rc::new(HttpClient::new(&cfg.http));
    let mut runner = StrategyRunner::standard(cfg, fetch, Box::new(StdConsole))
        .context("failed to build extraction patterns")?;

    log::info!("Processing {url}");
    Ok(runner.resolve(url)?)
}

fn download(cfg: &Config, url: Option<String>, yes: bool, convert: bool) -> anyhow::Result<()> {
    let mut console = StdConsole;

    let url = match url {
        Some(url) => url,
        None => {
            console.tell("Enter Spotify URL (track, album, or playlist):");
            console.tell("Example: https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh");
            console.ask("URL: ")?.unwrap_or_default()
        }
    };
    let url = url.trim();
    if url.is_empty() {
        bail!("No URL provided");
    }

    let outcome = resolve(cfg, url)?;
    print_tracks(&outcome.tracks);

    if !yes {
        let proceed = console
            .ask("Continue with download? [Y/n]: ")?
            .is_some_and(|answer| confirm(&answer));
        if !proceed {
            log::info!("Download cancelled");
            return Ok(());
        }
    }

    let output_dir = &cfg.download.output_dir;
    if prepare_output_dir(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?
    {
        log::info!("Created '{}' directory", output_dir.display());
    }

    let mut fetcher = YtDlp::new(&cfg.download, convert);
    let mut pacer = ThreadPacer;
    let report = DownloadOrchestrator::new(&mut fetcher, &mut pacer, cfg.download.delay())
        .run(&outcome.tracks);
    log::info!(
        "Finished: {} of {} downloaded, {} failed",
        report.succeeded.len(),
        report.attempted,
        report.failed.len()
    );

    print_summary(
        &summarize_output(output_dir, cfg.download.preview_len),
        output_dir,
    );
    Ok(())
}

fn print_tracks(tracks: &TrackList) {
    println!("Found {} track(s):", tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        println!("{:>3}. {track}", i + 1);
    }
}

fn print_summary(summary: &OutputSummary, dir: &Path) {
    if summary.total == 0 {
        println!("No audio files found in download folder");
        return;
    }

    println!("{} audio files in {}", summary.total, dir.display());
    println!("Files:");
    for name in &summary.preview {
        println!("  {name}");
    }
    if summary.total > summary.preview.len() {
        println!("  ... and {} more files", summary.total - summary.preview.len());
    }
}
