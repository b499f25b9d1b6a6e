use crate::clause::{Bucket, Clause, ClauseKind, PredicateValue};
use crate::conditions::Conditions;
use crate::predicates::Predicates;
use serde_json::{json, Map, Value};

/// Radius used by [`Filter::location`] when the caller has no preference
pub const DEFAULT_LOCATION_DISTANCE_KM: f64 = 100.0;

/// Geo-point attribute written by [`Filter::location`]
pub const GEO_POINT_ATTRIBUTE: &str = "lat_lon";

/// Builds the non-scoring (filter context) part of a search request
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Conditions,
}

impl Predicates for Filter {
    fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_filters(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Compiles the filter.
    ///
    /// A single condition with nothing negated is returned bare. Otherwise the
    /// result is a `bool` with `must`, `should` and `must_not` present only
    /// when non-empty; expanded nested groups are appended to `must`.
    /// Returns `None` when no condition was added.
    pub fn get_filters(&self) -> Option<Value> {
        if !self.has_filters() {
            return None;
        }

        let must = self.conditions.must();
        let should = self.conditions.should();
        let not = self.conditions.not();
        let nested = self.conditions.build_nested();

        if not.is_empty() && must.len() + should.len() + nested.len() == 1 {
            return must
                .iter()
                .chain(should)
                .map(Clause::to_value)
                .chain(nested)
                .next();
        }

        let mut body = Map::new();

        let mut must: Vec<Value> = must.iter().map(Clause::to_value).collect();
        must.extend(nested);
        if !must.is_empty() {
            body.insert("must".to_string(), Value::Array(must));
        }
        if !should.is_empty() {
            body.insert(
                "should".to_string(),
                Value::Array(should.iter().map(Clause::to_value).collect()),
            );
        }
        if !not.is_empty() {
            body.insert(
                "must_not".to_string(),
                Value::Array(not.iter().map(Clause::to_value).collect()),
            );
        }

        Some(json!({ "bool": body }))
    }

    pub fn reset(&mut self) {
        self.conditions.reset();
    }

    /// Copy with every bucket emptied
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    pub fn not_where(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions
            .push(Bucket::Not, ClauseKind::Term, field, value.into());
        self
    }

    pub fn not_where_in<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions.terms(Bucket::Not, field, values);
        self
    }

    pub fn exists(&mut self, field: &str) -> &mut Self {
        self.conditions.exists(Bucket::Must, field);
        self
    }

    pub fn or_exists(&mut self, field: &str) -> &mut Self {
        self.conditions.exists(Bucket::Should, field);
        self
    }

    pub fn not_exists(&mut self, field: &str) -> &mut Self {
        self.conditions.exists(Bucket::Not, field);
        self
    }

    /// Documents within `distance_km` of the given point
    pub fn location(&mut self, latitude: f64, longitude: f64, distance_km: f64) -> &mut Self {
        self.conditions.geo_distance(
            Bucket::Must,
            GEO_POINT_ATTRIBUTE,
            latitude,
            longitude,
            distance_km,
        );
        self
    }
}
