use crate::clause::{Bucket, Clause, ClauseKind, Fields, PredicateValue};
use crate::conditions::Conditions;
use crate::predicates::Predicates;
use indexmap::IndexSet;
use serde_json::{json, Map, Value};

/// Default `max_expansions` of a phrase-prefix match
pub const DEFAULT_MAX_EXPANSIONS: u32 = 150;

/// Builds the scoring part of a search request.
///
/// Only `must` and `should` are compiled; a query has no negated bucket.
#[derive(Debug, Clone)]
pub struct Query {
    conditions: Conditions,
    minimum_should_match: Value,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            conditions: Conditions::new(),
            minimum_should_match: json!(0),
        }
    }
}

impl Predicates for Query {
    fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a count (`2`) or any form the engine understands (`"75%"`)
    pub fn set_minimum_should_match(&mut self, minimum: impl Into<Value>) -> &mut Self {
        self.minimum_should_match = minimum.into();
        self
    }

    pub fn minimum_should_match(&self) -> &Value {
        &self.minimum_should_match
    }

    /// Compiles the accumulated predicates.
    ///
    /// A lone clause is returned as is. Otherwise the clauses are wrapped in
    /// `bool`, each bucket present only when non-empty, and
    /// `minimum_should_match` accompanies a non-empty `should`.
    /// Returns `None` when nothing was added.
    pub fn get_query(&self) -> Option<Value> {
        let must = self.conditions.must();
        let should = self.conditions.should();

        match (must, should) {
            ([], []) => None,
            ([single], []) | ([], [single]) => Some(single.to_value()),
            _ => {
                let mut body = Map::new();
                if !must.is_empty() {
                    body.insert("must".to_string(), clause_list(must));
                }
                if !should.is_empty() {
                    body.insert("should".to_string(), clause_list(should));
                    body.insert(
                        "minimum_should_match".to_string(),
                        self.minimum_should_match.clone(),
                    );
                }
                Some(json!({ "bool": body }))
            }
        }
    }

    /// Fields touched by the predicates, `None` if there are none
    pub fn fields(&self) -> Option<&IndexSet<String>> {
        let fields = self.conditions.fields();
        if fields.is_empty() {
            None
        } else {
            Some(fields)
        }
    }

    pub fn reset(&mut self) {
        self.conditions.reset();
        self.minimum_should_match = json!(0);
    }

    /// Copy with every bucket emptied, keeping `minimum_should_match`
    pub fn cleared(&self) -> Self {
        Self {
            conditions: Conditions::new(),
            minimum_should_match: self.minimum_should_match.clone(),
        }
    }

    pub fn match_phrase_prefix(&mut self, field: &str, phrase: &str, max_expansions: u32) -> &mut Self {
        self.conditions
            .match_phrase_prefix(Bucket::Must, field, phrase, max_expansions);
        self
    }

    pub fn or_match_phrase_prefix(
        &mut self,
        field: &str,
        phrase: &str,
        max_expansions: u32,
    ) -> &mut Self {
        self.conditions
            .match_phrase_prefix(Bucket::Should, field, phrase, max_expansions);
        self
    }

    /// `multi_match` over several fields; an options mapping (`query`,
    /// `type`, ...) is merged into the clause next to `fields`
    pub fn multi_match(
        &mut self,
        fields: impl Into<Fields>,
        value: impl Into<PredicateValue>,
    ) -> &mut Self {
        self.conditions
            .multi_match(Bucket::Must, fields.into(), value.into());
        self
    }

    pub fn or_multi_match(
        &mut self,
        fields: impl Into<Fields>,
        value: impl Into<PredicateValue>,
    ) -> &mut Self {
        self.conditions
            .multi_match(Bucket::Should, fields.into(), value.into());
        self
    }

    pub fn regex(&mut self, field: &str, pattern: impl Into<PredicateValue>) -> &mut Self {
        self.conditions
            .push(Bucket::Must, ClauseKind::Regexp, field, pattern.into());
        self
    }

    pub fn or_regex(&mut self, field: &str, pattern: impl Into<PredicateValue>) -> &mut Self {
        self.conditions
            .push(Bucket::Should, ClauseKind::Regexp, field, pattern.into());
        self
    }

    pub fn fuzzy(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions
            .push(Bucket::Must, ClauseKind::Fuzzy, field, value.into());
        self
    }

    pub fn or_fuzzy(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions
            .push(Bucket::Should, ClauseKind::Fuzzy, field, value.into());
        self
    }

    /// `fuzzy` with explicit tuning; falls back to the simple form when no
    /// tuning is given
    pub fn fuzzy_with(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        fuzziness: Option<Value>,
        max_expansions: Option<u32>,
    ) -> &mut Self {
        let value = fuzzy_options(value.into(), fuzziness, max_expansions);
        self.conditions
            .push(Bucket::Must, ClauseKind::Fuzzy, field, value);
        self
    }

    pub fn or_fuzzy_with(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        fuzziness: Option<Value>,
        max_expansions: Option<u32>,
    ) -> &mut Self {
        let value = fuzzy_options(value.into(), fuzziness, max_expansions);
        self.conditions
            .push(Bucket::Should, ClauseKind::Fuzzy, field, value);
        self
    }

    /// `fuzzy_like_this` over `fields`; `params` are merged into the clause
    pub fn fuzzy_like(
        &mut self,
        fields: impl Into<Fields>,
        like_text: &str,
        params: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.conditions
            .fuzzy_like(Bucket::Must, fields.into(), like_text, params);
        self
    }

    pub fn or_fuzzy_like(
        &mut self,
        fields: impl Into<Fields>,
        like_text: &str,
        params: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.conditions
            .fuzzy_like(Bucket::Should, fields.into(), like_text, params);
        self
    }
}

fn clause_list(clauses: &[Clause]) -> Value {
    Value::Array(clauses.iter().map(Clause::to_value).collect())
}

fn fuzzy_options(value: Value, fuzziness: Option<Value>, max_expansions: Option<u32>) -> PredicateValue {
    if fuzziness.is_none() && max_expansions.is_none() {
        return PredicateValue::Simple(value);
    }

    let mut options = Map::new();
    options.insert("value".to_string(), value);
    if let Some(fuzziness) = fuzziness {
        options.insert("fuzziness".to_string(), fuzziness);
    }
    if let Some(max_expansions) = max_expansions {
        options.insert("max_expansions".to_string(), json!(max_expansions));
    }
    PredicateValue::Options(options)
}
