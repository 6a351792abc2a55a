//! The download folder: creating it and summarising what landed in it

use std::path::Path;

use walkdir::WalkDir;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "webm"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Creates the download folder. Returns true if it did not exist before.
pub fn prepare_output_dir(dir: &Path) -> std::io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    Ok(true)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct OutputSummary {
    pub total: usize,
    /// First few file names, sorted
    pub preview: Vec<String>,
}

/// Best-effort look at the audio files sitting in the download folder.
///
/// Nothing ties these files to the tracks that were requested.
pub fn summarize_output(dir: &Path, preview_len: usize) -> OutputSummary {
    if !dir.is_dir() {
        return OutputSummary::default();
    }

    let mut names = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("error while scanning {}, skipping an entry: {err}", dir.display());
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect::<Vec<String>>();
    names.sort();

    OutputSummary {
        total: names.len(),
        preview: names.into_iter().take(preview_len).collect(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn summary_counts_audio_and_previews_first_names() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        for name in ["f.mp3", "a.M4A", "c.webm", "b.mp3", "e.mp3", "d.mp3", "notes.txt", "cover.jpg"] {
            std::fs::write(root.join(name), b"x").unwrap();
        }
        // nested files are not part of the summary
        std::fs::create_dir(root.join("old")).unwrap();
        std::fs::write(root.join("old").join("z.mp3"), b"x").unwrap();

        let summary = summarize_output(root, 5);

        assert_eq!(summary.total, 6);
        assert_eq!(summary.preview, vec!["a.M4A", "b.mp3", "c.webm", "d.mp3", "e.mp3"]);
    }

    #[test]
    fn missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();

        let summary = summarize_output(&tmp.path().join("nope"), 5);

        assert_eq!(summary, OutputSummary::default());
    }

    #[test]
    fn prepare_creates_once() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("music");

        assert!(prepare_output_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!prepare_output_dir(&dir).unwrap());
    }
}
