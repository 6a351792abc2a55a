use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to start {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("downloader failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
}
