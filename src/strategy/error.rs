use thiserror::Error;

use crate::{domain::reference::ReferenceError, http::FetchError};

/// Failure inside a single strategy. The runner logs it and moves on.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("bad JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("operator input error: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Failures that end the whole run
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("no tracks found for {0}")]
    NothingFound(String),
}
