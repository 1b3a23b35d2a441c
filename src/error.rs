use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// word list asset could not be found or read
    #[error("wordlist not found at {}", .0.display())]
    AssetMissing(PathBuf),

    /// nothing left to draw from after length filtering
    #[error("No words available")]
    EmptyWordSource,

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl Error {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
