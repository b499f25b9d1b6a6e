/// Failures surfaced by the request builder and its collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Invalid argument to a configuration-change operation
    Precondition(String),
    /// Id-based lookup or delete of a document that does not exist
    NotFound(String),
    /// Network failure, malformed request or rejection by the engine
    Transport(String),
    /// Unsupported locale, unknown message key or unusable settings
    Configuration(String),
}

impl SearchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchError::NotFound(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Precondition(msg) => write!(f, "Precondition failed: {}", msg),
            SearchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            SearchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SearchError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}
