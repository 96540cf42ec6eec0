use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhsError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GhsError>;

/// Failure of a single search submission.
///
/// Transport, status and decoding failures are collapsed into `Client`: the
/// state machine reacts to all of them the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("empty query")]
    EmptyQuery,

    #[error("search failed: {0}")]
    Client(String),
}

impl From<octocrab::Error> for SearchError {
    fn from(err: octocrab::Error) -> Self {
        SearchError::Client(err.to_string())
    }
}

impl From<octocrab::Error> for GhsError {
    fn from(err: octocrab::Error) -> Self {
        GhsError::Api(err.to_string())
    }
}
