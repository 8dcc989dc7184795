use thiserror::Error;

/// Errors raised by the search engine. Both kinds signal bad input at
/// the offending call; the engine never mutates state on failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
