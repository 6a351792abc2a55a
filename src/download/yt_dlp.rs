use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    config::DownloadConfig,
    download::{AudioFetcher, error::AcquisitionError},
};

/// yt-dlp takes the single best search hit for this directive
pub fn search_directive(query: &str) -> String {
    format!("ytsearch1:{query}")
}

/// Downloads audio through the yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    ffmpeg: Option<PathBuf>,
    output_dir: PathBuf,
    /// Target format, `None` keeps whatever container the source has
    audio_format: Option<String>,
}

impl YtDlp {
    /// `convert` should be false when ffmpeg is missing, yt-dlp cannot
    /// post-process without it.
    pub fn new(config: &DownloadConfig, convert: bool) -> Self {
        Self {
            binary: config.yt_dlp_path.clone(),
            ffmpeg: config.ffmpeg_path.clone(),
            output_dir: config.output_dir.clone(),
            audio_format: convert.then(|| config.audio_format.clone()),
        }
    }

    fn args(&self, query: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![search_directive(query).into()];
        match &self.audio_format {
            Some(format) => {
                args.extend(["--extract-audio".into(), "--audio-format".into()]);
                args.push(format.into());
                if let Some(ffmpeg) = &self.ffmpeg {
                    args.push("--ffmpeg-location".into());
                    args.push(ffmpeg.into());
                }
            }
            None => args.extend(["--format".into(), "bestaudio".into()]),
        }
        args.extend([
            "--output".into(),
            self.output_dir.join("%(title)s.%(ext)s").into(),
            "--print".into(),
            "after_move:filepath".into(),
            "--no-simulate".into(),
            "--no-warnings".into(),
        ]);
        args
    }
}

impl AudioFetcher for YtDlp {
    fn acquire(&mut self, query: &str) -> Result<Vec<String>, AcquisitionError> {
        let output = Command::new(&self.binary)
            .args(self.args(query))
            .output()
            .map_err(|source| AcquisitionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AcquisitionError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Availability of one external program
#[derive(Debug)]
pub struct ToolStatus {
    pub name: &'static str,
    pub path: PathBuf,
    /// First line of the version output, `None` when the tool did not run
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.version.is_some()
    }
}

fn probe(name: &'static str, path: &Path, version_flag: &str) -> ToolStatus {
    let version = Command::new(path)
        .arg(version_flag)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| {
            String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        });

    ToolStatus {
        name,
        path: path.to_path_buf(),
        version,
    }
}

/// Probes yt-dlp and ffmpeg
pub fn check_tools(config: &DownloadConfig) -> (ToolStatus, ToolStatus) {
    let ffmpeg = config
        .ffmpeg_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("ffmpeg"));
    (
        probe("yt-dlp", &config.yt_dlp_path, "--version"),
        probe("ffmpeg", &ffmpeg, "-version"),
    )
}
