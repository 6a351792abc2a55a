//! Recovers "Artist - Title" pairs from raw page markup with regexes

use regex::Regex;

use crate::{
    domain::track::{SEPARATOR, Track, TrackList},
    extract::error::PatternError,
};

/// Candidates this short are page noise
const MIN_TRACK_LEN: usize = 5;

/// What a pattern's capture groups mean
#[derive(Debug, Clone, Copy)]
pub enum Capture {
    /// Separate groups for the artist and the title
    Pair { artist: usize, title: usize },
    /// Group 1 already reads "Artist - Title"
    Combined,
}

#[derive(Debug, Clone)]
pub struct TrackPattern {
    regex: Regex,
    capture: Capture,
}

impl TrackPattern {
    pub fn pair(pattern: &str, artist: usize, title: usize) -> Result<Self, PatternError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            capture: Capture::Pair { artist, title },
        })
    }

    pub fn combined(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            capture: Capture::Combined,
        })
    }

    fn candidates<'a>(&'a self, markup: &'a str) -> impl Iterator<Item = Track> + 'a {
        self.regex
            .captures_iter(markup)
            .filter_map(move |caps| match self.capture {
                Capture::Pair { artist, title } => {
                    Track::from_parts(caps.get(artist)?.as_str(), caps.get(title)?.as_str())
                }
                Capture::Combined => {
                    let value = caps.get(1)?.as_str().trim();
                    (value.contains(SEPARATOR) || value.contains(" by "))
                        .then(|| Track::verbatim(value))
                }
            })
    }
}

/// Runs an ordered list of patterns over markup and merges what they find.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    patterns: Vec<TrackPattern>,
    brand: String,
    limit: usize,
}

impl PatternExtractor {
    pub fn new(patterns: Vec<TrackPattern>, brand: &str, limit: usize) -> Self {
        Self {
            patterns,
            brand: brand.to_lowercase(),
            limit,
        }
    }

    /// Patterns known to match provider pages: JSON-LD recordings, meta tags,
    /// microdata and a few inline JSON shapes.
    pub fn standard(brand: &str, limit: usize) -> Result<Self, PatternError> {
        let patterns = vec![
            TrackPattern::pair(
                r#"(?is)"@type"\s*:\s*"MusicRecording".*?"name"\s*:\s*"([^"]+)".*?"byArtist".*?"name"\s*:\s*"([^"]+)""#,
                2,
                1,
            )?,
            TrackPattern::combined(r#"(?is)<meta property="music:song" content="([^"]+)""#)?,
            TrackPattern::combined(
                r#"(?is)<meta property="og:title" content="([^"]*?(?:by|-).*?)""#,
            )?,
            TrackPattern::pair(
                r#"(?is)itemprop="name"[^>]*>([^<]+)<.*?itemprop="byArtist"[^>]*>([^<]+)<"#,
                2,
                1,
            )?,
            TrackPattern::pair(
                r#"(?is)"track":\{"uri":"spotify:track:[^"]*","name":"([^"]+)".*?"artists":\[\{"name":"([^"]+)""#,
                2,
                1,
            )?,
            TrackPattern::pair(
                r#"(?is)"name":"([^"]+)"[^}]*"artists":\[\{"name":"([^"]+)""#,
                2,
                1,
            )?,
            TrackPattern::pair(r#"(?is)"title":"([^"]+)"[^}]*"subtitle":"([^"]+)""#, 2, 1)?,
        ];
        Ok(Self::new(patterns, brand, limit))
    }

    pub fn extract(&self, markup: &str) -> TrackList {
        let candidates: TrackList = self
            .patterns
            .iter()
            .flat_map(|pattern| pattern.candidates(markup))
            .collect();

        let mut tracks = TrackList::with_limit(self.limit);
        tracks.extend(candidates.iter().filter(|t| self.keep(t)).cloned());
        tracks
    }

    fn keep(&self, track: &Track) -> bool {
        let s = track.as_str();
        let branded = !self.brand.is_empty() && s.trim().to_lowercase().starts_with(&self.brand);
        s.chars().count() > MIN_TRACK_LEN && s.contains(SEPARATOR) && !branded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PatternExtractor {
        PatternExtractor::standard("spotify", 50).unwrap()
    }

    fn recording(artist: &str, title: &str) -> String {
        format!(
            r#"{{"@type":"MusicRecording","name":"{title}","byArtist":{{"@type":"MusicGroup","name":"{artist}"}}}}"#
        )
    }

    #[test]
    fn single_recording_gives_one_track() {
        let html = format!(
            r#"<html><script type="application/ld+json">{}</script></html>"#,
            recording("Rick Astley", "Never Gonna Give You Up")
        );

        let tracks = extractor().extract(&html);

        assert_eq!(
            tracks.as_strings(),
            vec!["Rick Astley - Never Gonna Give You Up"]
        );
    }

    #[test]
    fn duplicated_recording_is_reported_once() {
        let record = recording("Rick Astley", "Never Gonna Give You Up");
        let html = format!("<div>{record}</div><div>{record}</div>");

        assert_eq!(extractor().extract(&html).len(), 1);
    }

    #[test]
    fn short_candidates_are_dropped() {
        let html = r#"<meta property="og:title" content="A - B">"#;

        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn six_chars_is_long_enough() {
        let html = r#"<meta property="music:song" content="A - BC">"#;

        assert_eq!(extractor().extract(html).as_strings(), vec!["A - BC"]);
    }

    #[test]
    fn brand_chrome_is_dropped() {
        let html = r#"<meta property="og:title" content="Spotify - Web Player">
<meta property="music:song" content="Queen - Bohemian Rhapsody">"#;

        assert_eq!(
            extractor().extract(html).as_strings(),
            vec!["Queen - Bohemian Rhapsody"]
        );
    }

    #[test]
    fn combined_without_dash_separator_is_dropped() {
        let html = r#"<meta property="og:title" content="Bohemian Rhapsody by Queen">"#;

        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn caps_at_limit() {
        let html: String = (0..60)
            .map(|i| recording(&format!("Artist {i}"), &format!("Song {i}")))
            .collect::<Vec<_>>()
            .join("\n");

        let tracks = extractor().extract(&html);

        assert_eq!(tracks.len(), 50);
        assert_eq!(tracks.iter().next().unwrap().as_str(), "Artist 0 - Song 0");
    }

    #[test]
    fn inline_json_shapes() {
        let html = r#"{"track":{"uri":"spotify:track:1","name":"Around the World","artists":[{"name":"Daft Punk"}]}}
{"title":"Teardrop","subtitle":"Massive Attack"}
<span itemprop="name">Windowlicker</span><span itemprop="byArtist">Aphex Twin</span>"#;

        let tracks = extractor().extract(html).as_strings();

        assert!(tracks.contains(&"Daft Punk - Around the World".to_string()));
        assert!(tracks.contains(&"Massive Attack - Teardrop".to_string()));
        assert!(tracks.contains(&"Aphex Twin - Windowlicker".to_string()));
        assert_eq!(tracks.len(), 3);
    }

    #[test]
    fn custom_patterns_are_used_in_order() {
        let patterns = vec![
            TrackPattern::pair(r"<b>([^<]+)</b>\s*/\s*<i>([^<]+)</i>", 1, 2).unwrap(),
            TrackPattern::combined(r"<li>([^<]+)</li>").unwrap(),
        ];
        let extractor = PatternExtractor::new(patterns, "", 50);

        let tracks = extractor.extract("<li>Bjork - Joga</li><b>Portishead</b> / <i>Roads</i>");

        assert_eq!(
            tracks.as_strings(),
            vec!["Portishead - Roads", "Bjork - Joga"]
        );
    }
}
