use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"spotify\.com/(track|album|playlist)/([A-Za-z0-9]+)")
        .expect("reference pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Track,
    Album,
    Playlist,
}

impl ContentType {
    /// Path segment used by the provider for this kind of content
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Track => "track",
            ContentType::Album => "album",
            ContentType::Playlist => "playlist",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("invalid reference url: {0}")]
    Malformed(String),
}

/// A track, album or playlist on the metadata provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub content_type: ContentType,
    pub id: String,
}

impl Reference {
    /// Parses a provider url. Query parameters are ignored.
    pub fn parse(url: &str) -> Result<Self, ReferenceError> {
        let without_query = url.split('?').next().unwrap_or_default();

        let caps = REFERENCE_PATTERN
            .captures(without_query)
            .ok_or_else(|| ReferenceError::Malformed(url.to_string()))?;

        let content_type = match &caps[1] {
            "track" => ContentType::Track,
            "album" => ContentType::Album,
            "playlist" => ContentType::Playlist,
            _ => return Err(ReferenceError::Malformed(url.to_string())),
        };

        Ok(Self {
            content_type,
            id: caps[2].to_string(),
        })
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.content_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_track_url_with_query() {
        let r = Reference::parse("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh?si=abc")
            .unwrap();

        assert_eq!(r.content_type, ContentType::Track);
        assert_eq!(r.id, "4iV5W9uYEdYUVa79Axb7Rh");
    }

    #[test]
    fn parses_album_and_playlist() {
        let album: Reference = "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3"
            .parse()
            .unwrap();
        assert_eq!(album.content_type, ContentType::Album);
        assert_eq!(album.id, "1DFixLWuPkv3KT3TnV35m3");

        let playlist =
            Reference::parse("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=x&pt=y")
                .unwrap();
        assert_eq!(playlist.content_type, ContentType::Playlist);
        assert_eq!(playlist.id, "37i9dQZF1DXcBWIGoYBM5M");
    }

    #[test]
    fn id_stops_at_non_alphanumeric() {
        let r = Reference::parse("https://open.spotify.com/track/abc123/extra").unwrap();
        assert_eq!(r.id, "abc123");
    }

    #[test]
    fn rejects_unknown_shapes() {
        for url in [
            "",
            "not a url",
            "https://open.spotify.com/artist/0OdUWJ0sBjDrqHygGUXeCF",
            "https://open.spotify.com/track/",
            "https://example.com/track/abc",
            "https://open.spotify.com/?track/abc",
        ] {
            assert!(
                matches!(Reference::parse(url), Err(ReferenceError::Malformed(_))),
                "{url} should not parse"
            );
        }
    }
}
