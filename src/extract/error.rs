use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid track pattern: {0}")]
    Regex(#[from] regex::Error),
}
