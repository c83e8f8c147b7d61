use thiserror::Error;

/// Failures of a single backend request.
///
/// The variants are only used internally (logging, retry decisions); the
/// search view collapses every failure except `EmptyResult` into one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Unexpected HTTP status: {0}")]
    BadStatus(u16),

    #[error("No result")]
    EmptyResult,

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::BadStatus(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::NetworkFailure(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ClarityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid placeholder phrases: {0}")]
    InvalidPhrases(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ClarityError>;
