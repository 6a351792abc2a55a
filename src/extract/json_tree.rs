//! Walks arbitrary JSON looking for track records

use serde_json::Value;

use crate::domain::track::{Track, TrackList};

/// A track record is an object with a `name` and an `artists` array whose
/// first entry has its own `name`.
fn as_track(node: &serde_json::Map<String, Value>) -> Option<Track> {
    let title = node.get("name")?.as_str()?.trim();
    let first_artist = node.get("artists")?.as_array()?.first()?.as_object()?;
    let artist = first_artist.get("name")?.as_str()?.trim();

    if title.is_empty() || artist.is_empty() {
        return None;
    }
    Some(Track::compose(artist, title))
}

#[derive(Debug, Clone, Copy)]
pub struct JsonTreeExtractor {
    max_depth: usize,
}

impl JsonTreeExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Collects every track record in document order
    pub fn extract(&self, value: &Value) -> TrackList {
        let mut tracks = TrackList::new();
        self.extract_into(value, &mut tracks);
        tracks
    }

    pub fn extract_into(&self, value: &Value, tracks: &mut TrackList) {
        self.walk(value, 0, tracks);
    }

    fn walk(&self, value: &Value, depth: usize, tracks: &mut TrackList) {
        if depth > self.max_depth {
            log::debug!("JSON nesting deeper than {}, not descending", self.max_depth);
            return;
        }

        match value {
            Value::Object(map) => {
                if let Some(track) = as_track(map) {
                    tracks.push(track);
                }
                // a record may itself hold nested records
                for child in map.values() {
                    self.walk(child, depth + 1, tracks);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.walk(item, depth + 1, tracks);
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }
    }
}
