//! Extraction strategies and the fallback chain that runs them

use std::rc::Rc;

use crate::{
    config::Config,
    console::Prompt,
    domain::{reference::Reference, track::TrackList},
    extract::{JsonTreeExtractor, PatternExtractor, error::PatternError},
    http::Fetch,
};

pub mod direct_page;
pub mod embed_page;
pub mod error;
pub mod manual;
pub mod oembed;

pub use direct_page::DirectPage;
pub use embed_page::EmbedPage;
pub use error::{ResolveError, StrategyError};
pub use manual::ManualEntry;
pub use oembed::MetadataApi;

/// Longest error text shown when a strategy fails
const ERROR_PREVIEW_LEN: usize = 50;

/// One way of turning a reference into tracks
pub trait Strategy {
    fn name(&self) -> &str;

    fn execute(&mut self, reference: &Reference, url: &str) -> Result<TrackList, StrategyError>;
}

#[derive(Debug)]
pub struct ExtractionOutcome {
    /// Strategy that produced the tracks, if any did
    pub strategy: Option<String>,
    pub tracks: TrackList,
}

/// Tries strategies in order until one finds something.
///
/// Failures never escape: an erroring strategy counts as an empty one.
/// The last strategy's answer is final, even when empty.
pub struct StrategyRunner {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRunner {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// oEmbed, embed page, direct page, then the operator
    pub fn standard(
        config: &Config,
        fetch: Rc<dyn Fetch>,
        prompt: Box<dyn Prompt>,
    ) -> Result<Self, PatternError> {
        let provider = &config.provider;
        let limit = config.extraction.max_tracks;
        let patterns = PatternExtractor::standard(&provider.brand, limit)?;
        let json = JsonTreeExtractor::new(config.extraction.max_json_depth);

        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(MetadataApi::new(fetch.clone(), &provider.oembed_url)),
            Box::new(EmbedPage::new(
                fetch.clone(),
                &provider.base_url,
                json,
                patterns.clone(),
                limit,
            )?),
            Box::new(DirectPage::new(fetch, &provider.base_url, patterns)),
            Box::new(ManualEntry::new(prompt)),
        ];
        Ok(Self::new(strategies))
    }

    pub fn run(&mut self, reference: &Reference, url: &str) -> ExtractionOutcome {
        for strategy in self.strategies.iter_mut() {
            let name = strategy.name().to_string();
            log::info!("Trying {name}...");

            match strategy.execute(reference, url) {
                Ok(tracks) if !tracks.is_empty() => {
                    log::info!("Found {} tracks using {name}", tracks.len());
                    return ExtractionOutcome {
                        strategy: Some(name),
                        tracks,
                    };
                }
                Ok(_) => log::warn!("No tracks found with {name}"),
                Err(e) => log::warn!("Error with {name}: {}", shorten(&e.to_string())),
            }
        }

        ExtractionOutcome {
            strategy: None,
            tracks: TrackList::new(),
        }
    }

    /// Parses the url and runs the chain. Only a bad url or an empty result
    /// stop the pipeline.
    pub fn resolve(&mut self, url: &str) -> Result<ExtractionOutcome, ResolveError> {
        let reference = Reference::parse(url)?;
        log::info!(
            "Detected {} with ID: {}",
            reference.content_type,
            reference.id
        );

        let outcome = self.run(&reference, url);
        if outcome.tracks.is_empty() {
            return Err(ResolveError::NothingFound(url.to_string()));
        }
        Ok(outcome)
    }
}

fn shorten(message: &str) -> String {
    if message.chars().count() <= ERROR_PREVIEW_LEN {
        return message.to_string();
    }
    let head: String = message.chars().take(ERROR_PREVIEW_LEN).collect();
    format!("{head}...")
}
