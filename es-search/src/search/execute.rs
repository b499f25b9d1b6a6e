use super::builder::Searcher;
use crate::error::SearchError;
use crate::highlight::Highlight;
use crate::messages::keys;
use crate::results::{map_response, SearchResults};
use crate::transport::DocumentRequest;
use serde_json::Value;

// Round-trips never propagate transport failures: they are logged (when
// enabled) and the call yields `None`.
impl Searcher {
    /// Runs the search and maps its hits
    pub fn get(&self) -> Option<SearchResults> {
        let request = self.build_request(Highlight::Enabled);
        match self.transport.search(&request) {
            Ok(response) => map_response(&response),
            Err(err) => {
                self.report(keys::QUERY_ERROR, &request.to_string(), &err, false);
                None
            }
        }
    }

    /// Deletes every document matching the current query and filters
    pub fn delete(&self) -> Option<Value> {
        let request = self.build_request(Highlight::Disabled);
        match self.transport.delete_by_query(&request) {
            Ok(result) => Some(result),
            Err(err) => {
                self.report(keys::DELETE_ERROR, &request.to_string(), &err, false);
                None
            }
        }
    }

    /// Source of the document `id`, `None` when missing or empty
    pub fn get_by_id(&self, id: &str) -> Option<Value> {
        let request = self.document_request(id)?;
        match self.transport.get(&request) {
            Ok(mut result) => match result.get_mut("_source").map(Value::take) {
                Some(Value::Object(source)) if !source.is_empty() => Some(Value::Object(source)),
                _ => None,
            },
            Err(err) => {
                self.report(keys::GET_BY_ID_ERROR, id, &err, true);
                None
            }
        }
    }

    pub fn delete_by_id(&self, id: &str) -> Option<Value> {
        let request = self.document_request(id)?;
        match self.transport.delete(&request) {
            Ok(result) => Some(result),
            Err(err) => {
                self.report(keys::DELETE_BY_ID_ERROR, id, &err, true);
                None
            }
        }
    }

    /// Runs the function-score search and maps its hits
    pub fn search_with_functions(&self) -> Option<SearchResults> {
        let request = self.build_function_score_request();
        match self.transport.search(&request) {
            Ok(response) => map_response(&response),
            Err(err) => {
                self.report(keys::FUNCTION_QUERY_ERROR, &request.to_string(), &err, false);
                None
            }
        }
    }

    fn document_request(&self, id: &str) -> Option<DocumentRequest> {
        let id = id.trim();
        if id.is_empty() {
            if self.logging {
                tracing::debug!("{}<empty id>", self.message(keys::DOCUMENT_NOT_FOUND));
            }
            return None;
        }
        Some(DocumentRequest {
            index: self.index.clone(),
            id: id.to_string(),
        })
    }

    fn report(&self, key: &'static str, detail: &str, err: &SearchError, by_id: bool) {
        if !self.logging {
            return;
        }
        if is_missing_document(err, by_id) {
            tracing::debug!("{}{} ({})", self.message(keys::DOCUMENT_NOT_FOUND), detail, err);
        } else {
            tracing::error!("{}{} ({})", self.message(key), detail, err);
        }
    }
}

/// Only id-based calls treat not-found as an expected absence
fn is_missing_document(err: &SearchError, by_id: bool) -> bool {
    by_id && err.is_not_found()
}
