//! Fluent predicate builders that compile into search-engine query documents.
//!
//! ```
//! use es_dsl::{Predicates, Query};
//! use serde_json::json;
//!
//! let mut query = Query::new();
//! query.where_("login", "bob");
//! assert_eq!(query.get_query(), Some(json!({"term": {"login": "bob"}})));
//! ```

mod clause;
mod conditions;
mod filter;
mod predicates;
mod query;

pub use clause::{strip_boost, Bucket, Clause, ClauseKind, Fields, PredicateValue};
pub use conditions::Conditions;
pub use filter::{Filter, DEFAULT_LOCATION_DISTANCE_KM, GEO_POINT_ATTRIBUTE};
pub use predicates::{Predicates, DEFAULT_SLOP};
pub use query::{Query, DEFAULT_MAX_EXPANSIONS};
