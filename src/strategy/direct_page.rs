use std::rc::Rc;

use crate::{
    domain::{reference::Reference, track::TrackList},
    extract::PatternExtractor,
    http::Fetch,
    strategy::{Strategy, StrategyError},
};

/// Runs the pattern extractor over the public page of the reference
pub struct DirectPage {
    fetch: Rc<dyn Fetch>,
    base_url: String,
    patterns: PatternExtractor,
}

impl DirectPage {
    pub fn new(fetch: Rc<dyn Fetch>, base_url: &str, patterns: PatternExtractor) -> Self {
        Self {
            fetch,
            base_url: base_url.trim_end_matches('/').to_string(),
            patterns,
        }
    }
}

impl Strategy for DirectPage {
    fn name(&self) -> &str {
        "Direct Page"
    }

    fn execute(&mut self, reference: &Reference, _url: &str) -> Result<TrackList, StrategyError> {
        let page_url = format!(
            "{}/{}/{}",
            self.base_url, reference.content_type, reference.id
        );
        let html = self.fetch.get_text(&page_url, &[])?;
        Ok(self.patterns.extract(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::reference::ContentType, http::FetchError};

    struct Unreachable;

    impl Fetch for Unreachable {
        fn get_text(&self, url: &str, _: &[(&str, &str)]) -> Result<String, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    struct Page;

    impl Fetch for Page {
        fn get_text(&self, url: &str, _: &[(&str, &str)]) -> Result<String, FetchError> {
            assert_eq!(url, "https://open.test/playlist/p1");
            Ok(r#"<span itemprop="name">Roads</span> <span itemprop="byArtist">Portishead</span>"#
                .to_string())
        }
    }

    fn playlist() -> Reference {
        Reference {
            content_type: ContentType::Playlist,
            id: "p1".to_string(),
        }
    }

    fn patterns() -> PatternExtractor {
        PatternExtractor::standard("spotify", 50).unwrap()
    }

    #[test]
    fn extracts_from_page() {
        let mut direct = DirectPage::new(Rc::new(Page), "https://open.test", patterns());

        let tracks = direct.execute(&playlist(), "url").unwrap();

        assert_eq!(tracks.as_strings(), vec!["Portishead - Roads"]);
    }

    #[test]
    fn fetch_errors_are_reported() {
        let mut direct = DirectPage::new(Rc::new(Unreachable), "https://open.test", patterns());

        let result = direct.execute(&playlist(), "url");

        assert!(matches!(
            result,
            Err(StrategyError::Fetch(FetchError::Status { status: 503, .. }))
        ));
    }
}
