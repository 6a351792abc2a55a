use std::rc::Rc;

use serde::Deserialize;

use crate::{
    domain::{
        reference::{ContentType, Reference},
        track::{Track, TrackList},
    },
    http::Fetch,
    strategy::{Strategy, StrategyError},
};

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// Asks the provider's oEmbed endpoint for the title.
///
/// Only single tracks resolve this way: for albums and playlists the title
/// names the collection, not a song.
pub struct MetadataApi {
    fetch: Rc<dyn Fetch>,
    endpoint: String,
}

impl MetadataApi {
    pub fn new(fetch: Rc<dyn Fetch>, endpoint: &str) -> Self {
        Self {
            fetch,
            endpoint: endpoint.to_string(),
        }
    }

    fn title(&self, url: &str) -> Result<Option<String>, StrategyError> {
        let body = self.fetch.get_text(&self.endpoint, &[("url", url)])?;
        let resp: OEmbedResponse = serde_json::from_str(&body)?;
        Ok(resp
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

impl Strategy for MetadataApi {
    fn name(&self) -> &str {
        "oEmbed API"
    }

    fn execute(&mut self, reference: &Reference, url: &str) -> Result<TrackList, StrategyError> {
        let mut tracks = TrackList::new();

        match self.title(url) {
            Ok(Some(title)) if reference.content_type == ContentType::Track => {
                tracks.push(Track::verbatim(title));
            }
            Ok(Some(title)) => log::info!("Found {}: {title}", reference.content_type),
            Ok(None) => {}
            Err(e) => log::debug!("oEmbed lookup failed: {e}"),
        }

        Ok(tracks)
    }
}
