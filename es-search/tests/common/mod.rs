//! Shared test doubles and fixtures for the es-search integration tests

#![allow(dead_code)]

use es_search::{DocumentRequest, SearchError, SearchRequest, Searcher, Transport};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Calls seen by [`RecordingTransport`], in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchRequest),
    DeleteByQuery(SearchRequest),
    Get(DocumentRequest),
    Delete(DocumentRequest),
}

/// In-memory transport answering every call with the same canned outcome
pub struct RecordingTransport {
    outcome: Result<Value, SearchError>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingTransport {
    pub fn responding(response: Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: SearchError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<Value, SearchError> {
        self.calls.lock().unwrap().push(call);
        self.outcome.clone()
    }
}

impl Transport for RecordingTransport {
    fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        self.record(Call::Search(request.clone()))
    }

    fn delete_by_query(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        self.record(Call::DeleteByQuery(request.clone()))
    }

    fn get(&self, request: &DocumentRequest) -> Result<Value, SearchError> {
        self.record(Call::Get(request.clone()))
    }

    fn delete(&self, request: &DocumentRequest) -> Result<Value, SearchError> {
        self.record(Call::Delete(request.clone()))
    }
}

/// Searcher on the `profiles` index backed by `transport`
pub fn searcher_with(transport: &Arc<RecordingTransport>) -> Searcher {
    let transport: Arc<dyn Transport> = transport.clone();
    Searcher::new("profiles", transport).unwrap()
}

/// Search response with two hits, one projected and one from `_source`
pub fn sample_response() -> Value {
    json!({
        "took": 3,
        "hits": {
            "total": {"value": 2, "relation": "eq"},
            "max_score": 1.2,
            "hits": [
                {
                    "_id": "7",
                    "_score": 1.2,
                    "fields": {"login": ["bob"]},
                    "_source": {"login": "bob", "age": 30}
                },
                {
                    "_id": "8",
                    "_score": 0.4,
                    "_source": {"login": "alice", "tags": ["admin", "ops"]},
                    "sort": [0.4],
                    "highlight": {"login": ["<em>alice</em>"]}
                }
            ]
        }
    })
}
