use crate::source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Network construction failed: could not resolve root profile: {0}")]
    Resolution(#[source] SourceError),

    #[error("Network construction failed: could not list followers: {0}")]
    Listing(#[source] SourceError),

    #[error("Network construction failed: invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
