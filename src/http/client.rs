use ureq::Agent;

use crate::{config::HttpConfig, http::error::FetchError};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Anything that can GET a page as text
pub trait Fetch {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// Blocking client shared by every strategy. Connections are pooled by the agent.
pub struct HttpClient {
    agent: Agent,
    accept_language: String,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Self {
        let agent_config = Agent::config_builder()
            .user_agent(&config.user_agent)
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            accept_language: config.accept_language.clone(),
        }
    }
}

impl Fetch for HttpClient {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let mut request = self
            .agent
            .get(url)
            .header("Accept", ACCEPT)
            .header("Accept-Language", &self.accept_language);
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        log::debug!("GET {url}");
        let mut resp = request.call().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        resp.body_mut()
            .read_to_string()
            .map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            })
    }
}
