use std::rc::Rc;

use regex::Regex;
use serde_json::Value;

use crate::{
    domain::{reference::Reference, track::TrackList},
    extract::{JsonTreeExtractor, PatternExtractor, error::PatternError},
    http::Fetch,
    strategy::{Strategy, StrategyError},
};

/// Where embed pages hide their state JSON
const STATE_MARKERS: &[&str] = &[
    r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.*?\});",
    r"(?s)window\.__PRELOADED_STATE__\s*=\s*(\{.*?\});",
    r"(?s)window\.Spotify\s*=\s*(\{.*?\});",
    r#"(?s)__NEXT_DATA__"\s*type="application/json">(\{.*?\})</script>"#,
];

/// Scrapes the embeddable player page, preferring its JSON state over raw markup
pub struct EmbedPage {
    fetch: Rc<dyn Fetch>,
    base_url: String,
    markers: Vec<Regex>,
    json: JsonTreeExtractor,
    patterns: PatternExtractor,
    limit: usize,
}

impl EmbedPage {
    pub fn new(
        fetch: Rc<dyn Fetch>,
        base_url: &str,
        json: JsonTreeExtractor,
        patterns: PatternExtractor,
        limit: usize,
    ) -> Result<Self, PatternError> {
        let markers = STATE_MARKERS
            .iter()
            .map(|m| Regex::new(m))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fetch,
            base_url: base_url.trim_end_matches('/').to_string(),
            markers,
            json,
            patterns,
            limit,
        })
    }

    fn embedded_tracks(&self, html: &str) -> TrackList {
        let mut tracks = TrackList::with_limit(self.limit);

        let blocks = self
            .markers
            .iter()
            .flat_map(|marker| marker.captures_iter(html))
            .filter_map(|caps| caps.get(1));

        for block in blocks {
            match serde_json::from_str::<Value>(block.as_str()) {
                Ok(value) => self.json.extract_into(&value, &mut tracks),
                Err(e) => log::debug!("skipping unparsable state block: {e}"),
            }
        }
        tracks
    }
}

impl Strategy for EmbedPage {
    fn name(&self) -> &str {
        "Embed Page"
    }

    fn execute(&mut self, reference: &Reference, _url: &str) -> Result<TrackList, StrategyError> {
        let embed_url = format!(
            "{}/embed/{}/{}",
            self.base_url, reference.content_type, reference.id
        );
        let html = self.fetch.get_text(&embed_url, &[])?;

        let tracks = self.embedded_tracks(&html);
        if tracks.is_empty() {
            return Ok(self.patterns.extract(&html));
        }
        Ok(tracks)
    }
}
