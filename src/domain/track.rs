use std::{collections::HashSet, fmt::Display};

pub const SEPARATOR: &str = " - ";

/// Represent a music track as "Artist - Title"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track(String);

impl Track {
    /// Builds a track out of a scraped pair, if both parts look real.
    pub fn from_parts(artist: &str, title: &str) -> Option<Self> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.chars().count() > 1 && title.chars().count() > 1 {
            Some(Self::compose(artist, title))
        } else {
            None
        }
    }

    pub(crate) fn compose(artist: &str, title: &str) -> Self {
        Self(format!("{artist}{SEPARATOR}{title}"))
    }

    /// Takes the string as is. Used for operator input and provider titles.
    pub fn verbatim(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, deduplicated list of tracks with an optional size cap.
///
/// Tracks keep the order in which they were discovered.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
    seen: HashSet<Track>,
    limit: Option<usize>,
}

impl TrackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns true if the track was added
    pub fn push(&mut self, track: Track) -> bool {
        if self.is_full() || self.seen.contains(&track) {
            return false;
        }
        self.seen.insert(track.clone());
        self.tracks.push(track);
        true
    }

    pub fn extend<I: IntoIterator<Item = Track>>(&mut self, tracks: I) {
        for track in tracks {
            if self.is_full() {
                break;
            }
            self.push(track);
        }
    }

    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.tracks.len() >= limit)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn as_strings(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.to_string()).collect()
    }
}

impl FromIterator<Track> for TrackList {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut list = TrackList::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a TrackList {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
