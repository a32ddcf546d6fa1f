use std::path::PathBuf;

/// All errors that can be returned while loading a state document.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The state file could not be read.
    #[error("failed to read state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the state shape.
    #[error("malformed state document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document uses a format newer than the flatmap layout.
    #[error("unsupported state version {version}: flatmap attributes require version {max} or lower")]
    UnsupportedVersion { version: u32, max: u32 },
}
