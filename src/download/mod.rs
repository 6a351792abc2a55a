//! Sequential downloading of a resolved track list

use std::time::Duration;

use crate::domain::track::{Track, TrackList};

pub mod error;
pub mod output;
pub mod yt_dlp;

pub use error::AcquisitionError;
pub use output::{OutputSummary, prepare_output_dir, summarize_output};
pub use yt_dlp::{YtDlp, check_tools};

/// External program that turns a search query into audio files
pub trait AudioFetcher {
    /// Returns the produced artifacts on success
    fn acquire(&mut self, query: &str) -> Result<Vec<String>, AcquisitionError>;
}

/// Spacing between downloads, swappable so tests need no wall clock
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

#[derive(Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

#[derive(Debug)]
pub struct Downloaded {
    /// Position in the track list, from 0
    pub index: usize,
    pub track: Track,
    pub artifacts: Vec<String>,
}

#[derive(Debug)]
pub struct FailedDownload {
    pub index: usize,
    pub track: Track,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub attempted: usize,
    pub succeeded: Vec<Downloaded>,
    pub failed: Vec<FailedDownload>,
}

/// Downloads tracks one at a time, in list order.
///
/// A failed track is logged and skipped. The batch always runs to the end.
pub struct DownloadOrchestrator<'a> {
    fetcher: &'a mut dyn AudioFetcher,
    pacer: &'a mut dyn Pacer,
    delay: Duration,
}

impl<'a> DownloadOrchestrator<'a> {
    pub fn new(fetcher: &'a mut dyn AudioFetcher, pacer: &'a mut dyn Pacer, delay: Duration) -> Self {
        Self {
            fetcher,
            pacer,
            delay,
        }
    }

    pub fn run(&mut self, tracks: &TrackList) -> DownloadReport {
        let total = tracks.len();
        let mut report = DownloadReport::default();

        for (index, track) in tracks.iter().enumerate() {
            let query = track.as_str().trim();
            log::info!("[{}/{total}] Searching for: '{query}'", index + 1);

            report.attempted += 1;
            match self.fetcher.acquire(query) {
                Ok(artifacts) => {
                    log::info!("Downloaded: {}", artifacts.join(", "));
                    report.succeeded.push(Downloaded {
                        index,
                        track: track.clone(),
                        artifacts,
                    });
                }
                Err(e) => {
                    log::error!("Download failed for '{query}': {e}");
                    report.failed.push(FailedDownload {
                        index,
                        track: track.clone(),
                        error: e.to_string(),
                    });
                }
            }

            if index + 1 < total {
                self.pacer.pause(self.delay);
            }
        }

        report
    }
}
