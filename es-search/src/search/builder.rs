use crate::config::Config;
use crate::error::SearchError;
use crate::function_score::{BoostMode, FunctionScore, GaussFunction, ScoreMode};
use crate::highlight::{build_highlight, build_plain_highlight, Highlight};
use crate::http::HttpTransport;
use crate::messages::{keys, Messages};
use crate::sort::{SortOrder, SortSpec};
use crate::transport::{SearchRequest, Transport};
use es_dsl::{Fields, Filter, Query};
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_GEO_DISTANCE_ATTRIBUTE: &str = "lat_lon";

/// `track_total_hits` setting: a flag or a counting limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackTotalHits {
    Enabled(bool),
    UpTo(u64),
}

impl From<TrackTotalHits> for Value {
    fn from(track: TrackTotalHits) -> Self {
        match track {
            TrackTotalHits::Enabled(enabled) => json!(enabled),
            TrackTotalHits::UpTo(limit) => json!(limit),
        }
    }
}

/// Request builder bound to one index.
///
/// Holds the compiled query, filters, sort, aggregations and scoring
/// functions of one logical search. Use [`Searcher::fresh`] to start the
/// next search with the same connection and pagination.
#[derive(Clone)]
pub struct Searcher {
    pub(super) index: String,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) messages: Messages,
    pub(super) logging: bool,
    geo_distance_attribute: String,
    body: Map<String, Value>,
    query: Option<Value>,
    queried_fields: Option<Vec<String>>,
    filter: Option<Value>,
    post_filter: Option<Value>,
    sort: SortSpec,
    aggregations: Map<String, Value>,
    functions: FunctionScore,
}

impl Searcher {
    pub fn new(index: &str, transport: Arc<dyn Transport>) -> Result<Self, SearchError> {
        let index = validate_index(index)?;
        Ok(Self {
            index,
            transport,
            messages: Messages::default(),
            logging: false,
            geo_distance_attribute: DEFAULT_GEO_DISTANCE_ATTRIBUTE.to_string(),
            body: Map::new(),
            query: None,
            queried_fields: None,
            filter: None,
            post_filter: None,
            sort: SortSpec::new(),
            aggregations: Map::new(),
            functions: FunctionScore::new(),
        })
    }

    /// Searcher talking HTTP to the configured engine
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let transport = HttpTransport::new(&config.engine)?;
        let mut searcher = Self::new(&config.engine.index, Arc::new(transport))?;
        searcher
            .set_messages(Messages::new(config.search.locale()?))
            .set_logging(config.search.logging)
            .set_geo_distance_attribute(&config.search.geo_distance_attribute)?;
        if let Some(size) = config.search.page_size {
            searcher.take(size);
        }
        Ok(searcher)
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn set_messages(&mut self, messages: Messages) -> &mut Self {
        self.messages = messages;
        self
    }

    pub fn logging(&self) -> bool {
        self.logging
    }

    /// Enables request dumps and failure logging
    pub fn set_logging(&mut self, logging: bool) -> &mut Self {
        self.logging = logging;
        self
    }

    pub fn geo_distance_attribute(&self) -> &str {
        &self.geo_distance_attribute
    }

    pub fn set_geo_distance_attribute(&mut self, attribute: &str) -> Result<&mut Self, SearchError> {
        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(SearchError::Precondition(
                "Geo distance attribute must not be empty".to_string(),
            ));
        }
        self.geo_distance_attribute = attribute.to_string();
        Ok(self)
    }

    pub fn change_index(&mut self, index: &str) -> Result<&mut Self, SearchError> {
        self.index = validate_index(index)?;
        Ok(self)
    }

    /// Number of hits per page
    pub fn take(&mut self, records: u64) -> &mut Self {
        self.body.insert("size".to_string(), json!(records));
        self
    }

    /// Offset of the zero-based `page`; always 0 until [`Searcher::take`] set a size
    pub fn page(&mut self, page: u64) -> &mut Self {
        let from = self
            .body
            .get("size")
            .and_then(Value::as_u64)
            .map_or(0, |size| page * size);
        self.body.insert("from".to_string(), json!(from));
        self
    }

    pub fn page_size(&self) -> u64 {
        self.body
            .get("size")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn set_track_total_hits(&mut self, track: TrackTotalHits) -> &mut Self {
        self.body
            .insert("track_total_hits".to_string(), Value::from(track));
        self
    }

    pub fn min_score(&mut self, score: f64) -> &mut Self {
        self.body.insert("min_score".to_string(), json!(score));
        self
    }

    pub fn max_score(&mut self, score: f64) -> &mut Self {
        self.body.insert("max_score".to_string(), json!(score));
        self
    }

    /// Restricts the returned fields, adding to any earlier selection
    pub fn select(&mut self, fields: impl Into<Fields>) -> &mut Self {
        let fields = fields.into();
        let selected = self
            .body
            .entry("fields")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(selected) = selected {
            selected.extend(fields.into_inner().into_iter().map(Value::String));
        }
        self
    }

    pub fn order_by(&mut self, field: &str, order: SortOrder) -> &mut Self {
        self.sort.push_order(field, order);
        self
    }

    /// Raw sort entry, e.g. `proximity` with a `"lat,lon"` origin
    pub fn order_by_value(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.sort.push(field, value.into());
        self
    }

    /// Terms aggregation on `field`, keyed `"{field}s"`
    pub fn group_by(&mut self, field: &str) -> &mut Self {
        self.aggregations
            .insert(format!("{}s", field), json!({ "terms": { "field": field } }));
        self
    }

    pub fn set_query(&mut self, query: &Query) -> &mut Self {
        self.query = query.get_query();
        self.queried_fields = query
            .fields()
            .map(|fields| fields.iter().cloned().collect());
        self
    }

    pub fn set_filter(&mut self, filter: &Filter) -> &mut Self {
        self.filter = filter.get_filters();
        self
    }

    pub fn set_post_filter(&mut self, filter: &Filter) -> &mut Self {
        self.post_filter = filter.get_filters();
        self
    }

    pub fn clean_order(&mut self) -> &mut Self {
        self.sort.clear();
        self
    }

    pub fn clean_filters(&mut self) -> &mut Self {
        self.filter = None;
        self.post_filter = None;
        self
    }

    pub fn clean_query(&mut self) -> &mut Self {
        self.query = None;
        self.queried_fields = None;
        self
    }

    pub fn clean_group(&mut self) -> &mut Self {
        self.aggregations.clear();
        self
    }

    pub fn clean_functions(&mut self) -> &mut Self {
        self.functions.clear();
        self
    }

    /// Drops query, filters, sort, aggregations and scoring functions.
    /// Pagination and field selection are kept.
    pub fn clean_request(&mut self) -> &mut Self {
        self.clean_order()
            .clean_filters()
            .clean_query()
            .clean_group()
            .clean_functions()
    }

    /// Copy sharing index, transport and settings, with the search state cleared
    pub fn fresh(&self) -> Self {
        let mut searcher = self.clone();
        searcher.clean_request();
        searcher
    }

    pub fn set_score_functions_mode(
        &mut self,
        score_mode: ScoreMode,
        boost_mode: BoostMode,
    ) -> &mut Self {
        self.functions.set_modes(score_mode, boost_mode);
        self
    }

    pub fn add_gauss_function(&mut self, gauss: GaussFunction) -> &mut Self {
        self.functions.add_gauss(gauss);
        self
    }

    /// Any other scoring function, as the engine expects it
    pub fn add_function(&mut self, function: Value) -> &mut Self {
        self.functions.add_function(function);
        self
    }

    /// Compiles the plain search request
    pub fn build_request(&self, highlight: Highlight) -> SearchRequest {
        let mut body = self.body.clone();

        let query = self.query.clone().unwrap_or_else(match_all);
        let query = match &self.filter {
            Some(filter) => json!({ "bool": { "must": query, "filter": filter } }),
            None => query,
        };
        body.insert("query".to_string(), query);

        if let Some(post_filter) = &self.post_filter {
            body.insert("post_filter".to_string(), post_filter.clone());
        }
        self.attach_sort_and_aggs(&mut body);

        if highlight.should_highlight() {
            if let Some(fields) = &self.queried_fields {
                body.insert("highlight".to_string(), build_highlight(fields));
            }
        }

        let request = self.request(body);
        if self.logging {
            tracing::debug!("{}{}", self.message(keys::REQUEST_BODY), request);
        }
        request
    }

    /// Compiles the request of a function-score search.
    ///
    /// The query is always wrapped in `bool.must`, with the filter beside it.
    pub fn build_function_score_request(&self) -> SearchRequest {
        let mut body = self.body.clone();

        let mut scored = Map::new();
        scored.insert(
            "must".to_string(),
            self.query.clone().unwrap_or_else(match_all),
        );
        if let Some(filter) = &self.filter {
            scored.insert("filter".to_string(), filter.clone());
        }
        body.insert(
            "query".to_string(),
            self.functions.build(json!({ "bool": scored })),
        );

        self.attach_sort_and_aggs(&mut body);
        if let Some(fields) = &self.queried_fields {
            body.insert("highlight".to_string(), build_plain_highlight(fields));
        }

        let request = self.request(body);
        if self.logging {
            tracing::debug!("{}{}", self.message(keys::FUNCTION_REQUEST_BODY), request);
        }
        request
    }

    fn attach_sort_and_aggs(&self, body: &mut Map<String, Value>) {
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                self.sort.build(&self.geo_distance_attribute),
            );
        }
        if !self.aggregations.is_empty() {
            body.insert(
                "aggs".to_string(),
                Value::Object(self.aggregations.clone()),
            );
        }
    }

    fn request(&self, body: Map<String, Value>) -> SearchRequest {
        SearchRequest {
            index: self.index.clone(),
            body: Value::Object(body),
        }
    }

    /// Localized log prefix; the key itself when the table lacks it
    pub(super) fn message(&self, key: &'static str) -> &'static str {
        self.messages.get(key).unwrap_or_else(|err| {
            tracing::warn!("{}", err);
            key
        })
    }
}

fn match_all() -> Value {
    json!({ "match_all": {} })
}

fn validate_index(index: &str) -> Result<String, SearchError> {
    let index = index.trim();
    if index.is_empty() {
        return Err(SearchError::Precondition(
            "Index name must not be empty".to_string(),
        ));
    }
    Ok(index.to_string())
}
