use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::transport::{DocumentRequest, SearchRequest, Transport};
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// [`Transport`] over the engine's REST API
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpTransport {
    pub fn new(config: &EngineConfig) -> Result<Self, SearchError> {
        let endpoint = config.endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(SearchError::Configuration(
                "Engine endpoint must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SearchError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one request. With `by_id`, a 404 means the document is missing
    /// and maps to [`SearchError::NotFound`]; otherwise it is a transport error.
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        by_id: bool,
    ) -> Result<Value, SearchError> {
        let url = format!("{}{}", self.endpoint, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_deref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| SearchError::Transport(format!("Failed to {} {}: {}", method, path, e)))?;

        let status = response.status();
        let text = response.text()?;

        if by_id && status == StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound(format!("{} {}", method, path)));
        }
        if !status.is_success() {
            return Err(SearchError::Transport(format!(
                "HTTP {} for {} {}: {}",
                status, method, path, text
            )));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            SearchError::Transport(format!("Failed to parse response from {}: {}", path, e))
        })
    }
}

fn index_path(index: &str, action: &str) -> String {
    format!("/{}/{}", urlencoding::encode(index), action)
}

fn document_path(request: &DocumentRequest) -> String {
    format!(
        "/{}/_doc/{}",
        urlencoding::encode(&request.index),
        urlencoding::encode(&request.id)
    )
}

impl Transport for HttpTransport {
    fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        self.send(
            Method::POST,
            &index_path(&request.index, "_search"),
            Some(&request.body),
            false,
        )
    }

    fn delete_by_query(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        self.send(
            Method::POST,
            &index_path(&request.index, "_delete_by_query"),
            Some(&request.body),
            false,
        )
    }

    fn get(&self, request: &DocumentRequest) -> Result<Value, SearchError> {
        self.send(Method::GET, &document_path(request), None, true)
    }

    fn delete(&self, request: &DocumentRequest) -> Result<Value, SearchError> {
        self.send(Method::DELETE, &document_path(request), None, true)
    }
}
