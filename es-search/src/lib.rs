//! Request builder and result mapper for a document-search engine.
//!
//! Predicates come from [`es_dsl`]; a [`Searcher`] turns them into a search
//! request with pagination, sorting, aggregations, highlighting and scoring
//! functions, sends it through a [`Transport`] and maps the hits.

pub mod config;
pub mod error;
pub mod function_score;
pub mod highlight;
pub mod http;
pub mod messages;
pub mod results;
pub mod search;
pub mod sort;
pub mod transport;

pub use config::{Config, EngineConfig, SearchConfig};
pub use error::SearchError;
pub use function_score::{BoostMode, FunctionScore, GaussFunction, ScoreMode, DEFAULT_DECAY};
pub use highlight::Highlight;
pub use http::HttpTransport;
pub use messages::{Locale, Messages};
pub use results::{map_hit, map_response, Document, SearchResults};
pub use search::{Searcher, TrackTotalHits, DEFAULT_GEO_DISTANCE_ATTRIBUTE, DEFAULT_PAGE_SIZE};
pub use sort::{SortOrder, SortSpec, PROXIMITY};
pub use transport::{DocumentRequest, SearchRequest, Transport};

pub use es_dsl;
