use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no section with anchor '#{0}'")]
    UnknownAnchor(String),

    #[error("invalid asset manifest")]
    Manifest(#[source] serde_json::Error),

    #[error("invalid page options")]
    Options(#[source] serde_json::Error),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;
