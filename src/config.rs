use anyhow::Context;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub http: HttpConfig,
    pub extraction: ExtractionConfig,
    pub download: DownloadConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

/// Where tracks are looked up
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub oembed_url: String,
    /// Candidates starting with this word (any case) are page chrome, not tracks
    pub brand: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.spotify.com".to_string(),
            oembed_url: "https://open.spotify.com/oembed".to_string(),
            brand: "spotify".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_tracks: usize,
    pub max_json_depth: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_tracks: 50,
            max_json_depth: 128,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DownloadConfig {
    pub output_dir: PathBuf,
    pub yt_dlp_path: PathBuf,
    pub ffmpeg_path: Option<PathBuf>,
    pub audio_format: String,
    /// Pause between two downloads, in milliseconds
    pub delay_ms: u64,
    pub preview_len: usize,
}

impl DownloadConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("music"),
            yt_dlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_path: None,
            audio_format: "mp3".to_string(),
            delay_ms: 1000,
            preview_len: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
[provider]
brand = "acme"

[http]
timeout_secs = 5

[extraction]
max_tracks = 10

[download]
output_dir = "/tmp/tracks"
ffmpeg_path = "/opt/homebrew/bin/ffmpeg"
delay_ms = 250
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.provider.brand, "acme");
        // untouched keys keep their defaults
        assert_eq!(cfg.provider.base_url, "https://open.spotify.com");

        assert_eq!(cfg.http.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.extraction.max_tracks, 10);
        assert_eq!(cfg.extraction.max_json_depth, 128);

        assert_eq!(cfg.download.output_dir, PathBuf::from("/tmp/tracks"));
        assert_eq!(
            cfg.download.ffmpeg_path,
            Some(PathBuf::from("/opt/homebrew/bin/ffmpeg"))
        );
        assert_eq!(cfg.download.delay(), Duration::from_millis(250));
        assert_eq!(cfg.download.audio_format, "mp3");

        Ok(())
    }

    #[test]
    fn test_load_config_file() -> anyhow::Result<()> {
        let tmp = tempfile::TempDir::new()?;
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[download]\naudio_format = \"m4a\"\n")?;

        let cfg = Config::load(&path)?;

        assert_eq!(cfg.download.audio_format, "m4a");
        assert!(Config::load(&tmp.path().join("missing.toml")).is_err());

        Ok(())
    }

    #[test]
    fn test_parse_empty_config() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("")?;

        assert_eq!(cfg.extraction.max_tracks, 50);
        assert_eq!(cfg.download.output_dir, PathBuf::from("music"));
        assert_eq!(cfg.download.preview_len, 5);
        assert!(cfg.download.ffmpeg_path.is_none());

        Ok(())
    }
}
