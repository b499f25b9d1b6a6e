use crate::error::SearchError;
use serde::Serialize;
use serde_json::{json, Value};

/// Body-carrying request against an index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub index: String,
    pub body: Value,
}

impl std::fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", json!({"index": self.index, "body": self.body}))
    }
}

/// Id-based request against an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRequest {
    pub index: String,
    pub id: String,
}

/// Client side of the search engine.
///
/// Implementations report a missing document on `get`/`delete` as
/// [`SearchError::NotFound`] and every other failure as
/// [`SearchError::Transport`].
pub trait Transport: Send + Sync {
    fn search(&self, request: &SearchRequest) -> Result<Value, SearchError>;

    fn delete_by_query(&self, request: &SearchRequest) -> Result<Value, SearchError>;

    fn get(&self, request: &DocumentRequest) -> Result<Value, SearchError>;

    fn delete(&self, request: &DocumentRequest) -> Result<Value, SearchError>;
}
