use crate::clause::{strip_boost, Bucket, Clause, ClauseKind, Fields, PredicateValue};
use indexmap::{IndexMap, IndexSet};
use serde_json::{json, Map, Value};

/// Clause buckets shared by queries and filters.
///
/// Every builder registers the field(s) it touches and appends exactly one
/// clause to the selected bucket; bucket order is the call order and is never
/// rearranged. Nested conditions are kept apart, grouped by clause kind and
/// field, until they are expanded into alternatives by [`Conditions::build_nested`].
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    must: Vec<Clause>,
    should: Vec<Clause>,
    not: Vec<Clause>,
    nested: IndexMap<ClauseKind, IndexMap<String, Vec<Value>>>,
    fields: IndexSet<String>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Clause> {
        match bucket {
            Bucket::Must => &mut self.must,
            Bucket::Should => &mut self.should,
            Bucket::Not => &mut self.not,
        }
    }

    pub fn must(&self) -> &[Clause] {
        &self.must
    }

    pub fn should(&self) -> &[Clause] {
        &self.should
    }

    pub fn not(&self) -> &[Clause] {
        &self.not
    }

    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Field names referenced by the predicates so far, boost suffixes removed
    pub fn fields(&self) -> &IndexSet<String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.not.is_empty() && !self.has_nested()
    }

    pub fn reset(&mut self) {
        self.must.clear();
        self.should.clear();
        self.not.clear();
        self.nested.clear();
        self.fields.clear();
    }

    pub fn register_field(&mut self, field: &str) {
        let name = strip_boost(field);
        if !self.fields.contains(name) {
            self.fields.insert(name.to_string());
        }
    }

    fn register_fields(&mut self, fields: &Fields) {
        for field in fields.iter() {
            self.register_field(field);
        }
    }

    /// Appends `{kind: {field: value}}`; an options mapping is nested under the field
    pub fn push(
        &mut self,
        bucket: Bucket,
        kind: ClauseKind,
        field: &str,
        value: PredicateValue,
    ) -> &mut Self {
        self.register_field(field);
        // An empty option set contributes no clause
        if matches!(&value, PredicateValue::Options(options) if options.is_empty()) {
            return self;
        }
        self.bucket_mut(bucket)
            .push(Clause::single(kind, field, value.into_value()));
        self
    }

    /// Merges options into the most recent clause of the bucket when it has
    /// the same kind, otherwise starts a new clause from the options alone.
    pub fn extend_last(
        &mut self,
        bucket: Bucket,
        kind: ClauseKind,
        options: Map<String, Value>,
    ) -> &mut Self {
        let clauses = self.bucket_mut(bucket);
        match clauses.last_mut() {
            Some(clause) if clause.kind() == kind => clause.body_mut().extend(options),
            _ => clauses.push(Clause::new(kind, options)),
        }
        self
    }

    pub fn terms(&mut self, bucket: Bucket, field: &str, values: Vec<Value>) -> &mut Self {
        self.register_field(field);
        let mut body = Map::new();
        body.insert(field.to_string(), Value::Array(values));
        body.insert("execution".to_string(), json!("bool"));
        self.bucket_mut(bucket).push(Clause::new(ClauseKind::Terms, body));
        self
    }

    pub fn match_phrase(&mut self, bucket: Bucket, field: &str, phrase: &str, slop: u32) -> &mut Self {
        self.push(
            bucket,
            ClauseKind::MatchPhrase,
            field,
            PredicateValue::from(json!({"query": phrase, "slop": slop})),
        )
    }

    pub fn match_phrase_prefix(
        &mut self,
        bucket: Bucket,
        field: &str,
        phrase: &str,
        max_expansions: u32,
    ) -> &mut Self {
        self.push(
            bucket,
            ClauseKind::MatchPhrasePrefix,
            field,
            PredicateValue::from(json!({"query": phrase, "max_expansions": max_expansions})),
        )
    }

    pub fn multi_match(&mut self, bucket: Bucket, fields: Fields, value: PredicateValue) -> &mut Self {
        self.register_fields(&fields);
        let mut body = Map::new();
        body.insert("fields".to_string(), fields.to_value());
        self.bucket_mut(bucket)
            .push(Clause::new(ClauseKind::MultiMatch, body));

        match value {
            PredicateValue::Simple(query) => {
                let mut options = Map::new();
                options.insert("query".to_string(), query);
                self.extend_last(bucket, ClauseKind::MultiMatch, options)
            }
            PredicateValue::Options(options) => {
                self.extend_last(bucket, ClauseKind::MultiMatch, options)
            }
        }
    }

    /// Range clause with whichever of `gte`/`lte` are given
    pub fn range(
        &mut self,
        bucket: Bucket,
        field: &str,
        gte: Option<Value>,
        lte: Option<Value>,
    ) -> &mut Self {
        self.push(
            bucket,
            ClauseKind::Range,
            field,
            PredicateValue::Options(range_bounds(gte, lte)),
        )
    }

    pub fn fuzzy_like(
        &mut self,
        bucket: Bucket,
        fields: Fields,
        like_text: &str,
        params: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.register_fields(&fields);
        let mut body = Map::new();
        body.insert("fields".to_string(), fields.to_value());
        body.insert("like_text".to_string(), json!(like_text));
        if let Some(params) = params {
            body.extend(params);
        }
        self.bucket_mut(bucket)
            .push(Clause::new(ClauseKind::FuzzyLike, body));
        self
    }

    pub fn exists(&mut self, bucket: Bucket, field: &str) -> &mut Self {
        self.bucket_mut(bucket)
            .push(Clause::single(ClauseKind::Exists, "field", json!(field)));
        self
    }

    /// `geo_distance` clause: `"{distance}km"` around the `"{lat},{lon}"` point
    pub fn geo_distance(
        &mut self,
        bucket: Bucket,
        attribute: &str,
        latitude: f64,
        longitude: f64,
        distance_km: f64,
    ) -> &mut Self {
        let mut body = Map::new();
        body.insert("distance".to_string(), json!(format!("{}km", distance_km)));
        body.insert(
            attribute.to_string(),
            json!(format!("{},{}", latitude, longitude)),
        );
        self.bucket_mut(bucket)
            .push(Clause::new(ClauseKind::GeoDistance, body));
        self
    }

    /// Records one or more alternative values for `kind` on `field`
    pub fn nest_value(&mut self, kind: ClauseKind, field: &str, value: PredicateValue) -> &mut Self {
        self.register_field(field);
        let values = self
            .nested
            .entry(kind)
            .or_default()
            .entry(field.to_string())
            .or_default();
        match value {
            PredicateValue::Simple(Value::Array(items)) => *values = items,
            PredicateValue::Simple(item) => values.push(item),
            PredicateValue::Options(options) => {
                *values = options.into_iter().map(|(_, v)| v).collect()
            }
        }
        self
    }

    /// Records a nested range on `field`; a later range on the same field replaces it
    pub fn nest_range(&mut self, field: &str, gte: Option<Value>, lte: Option<Value>) -> &mut Self {
        self.register_field(field);
        self.nested
            .entry(ClauseKind::Range)
            .or_default()
            .insert(field.to_string(), vec![Value::Object(range_bounds(gte, lte))]);
        self
    }

    /// Expands nested groups into `bool.should` alternatives.
    ///
    /// Discrete groups give one `bool` per field with a clause per value. All
    /// range fields share a single `bool`, one clause per field.
    pub fn build_nested(&self) -> Vec<Value> {
        let mut expanded = Vec::new();

        for (kind, group) in &self.nested {
            if *kind == ClauseKind::Range {
                let branches: Vec<Value> = group
                    .iter()
                    .filter_map(|(field, bounds)| {
                        bounds
                            .first()
                            .map(|b| Clause::single(*kind, field, b.clone()).into())
                    })
                    .collect();
                expanded.push(json!({"bool": {"should": branches}}));
                continue;
            }

            for (field, values) in group {
                let branches: Vec<Value> = values
                    .iter()
                    .map(|v| Clause::single(*kind, field, v.clone()).into())
                    .collect();
                expanded.push(json!({"bool": {"should": branches}}));
            }
        }

        expanded
    }
}

fn range_bounds(gte: Option<Value>, lte: Option<Value>) -> Map<String, Value> {
    let mut bounds = Map::new();
    if let Some(gte) = gte {
        bounds.insert("gte".to_string(), gte);
    }
    if let Some(lte) = lte {
        bounds.insert("lte".to_string(), lte);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(clauses: &[Clause]) -> Vec<Value> {
        clauses.iter().map(Clause::to_value).collect()
    }

    #[test]
    fn test_push_targets_selected_bucket() {
        let mut conditions = Conditions::new();
        conditions
            .push(Bucket::Must, ClauseKind::Term, "a", 1.into())
            .push(Bucket::Should, ClauseKind::Prefix, "b", "x".into())
            .push(Bucket::Not, ClauseKind::Wildcard, "c", "y*".into());

        assert_eq!(values(conditions.must()), vec![json!({"term": {"a": 1}})]);
        assert_eq!(values(conditions.should()), vec![json!({"prefix": {"b": "x"}})]);
        assert_eq!(values(conditions.not()), vec![json!({"wildcard": {"c": "y*"}})]);
    }

    #[test]
    fn test_options_nest_under_field() {
        let mut conditions = Conditions::new();
        conditions.push(
            Bucket::Must,
            ClauseKind::Regexp,
            "gender",
            json!({"value": "wom(a|e)n", "boost": 2}).into(),
        );
        assert_eq!(
            values(conditions.must()),
            vec![json!({"regexp": {"gender": {"value": "wom(a|e)n", "boost": 2}}})]
        );
    }

    #[test]
    fn test_fields_registered_once_without_boost() {
        let mut conditions = Conditions::new();
        conditions
            .push(Bucket::Must, ClauseKind::Match, "title^3", "x".into())
            .multi_match(Bucket::Should, Fields::from("title^2, body"), "x".into());

        let fields: Vec<&str> = conditions.fields().iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_extend_last_merges_into_same_kind() {
        let mut conditions = Conditions::new();
        conditions.multi_match(
            Bucket::Must,
            Fields::from(vec!["login", "name"]),
            json!({"query": "bob", "type": "most_fields"}).into(),
        );
        assert_eq!(
            values(conditions.must()),
            vec![json!({"multi_match": {
                "fields": ["login", "name"],
                "query": "bob",
                "type": "most_fields"
            }})]
        );
    }

    #[test]
    fn test_extend_last_starts_new_clause_on_kind_mismatch() {
        let mut conditions = Conditions::new();
        let mut options = Map::new();
        options.insert("query".to_string(), json!("bob"));
        conditions
            .push(Bucket::Must, ClauseKind::Term, "a", 1.into())
            .extend_last(Bucket::Must, ClauseKind::MultiMatch, options);
        assert_eq!(conditions.must().len(), 2);
        assert_eq!(conditions.must()[1].to_value(), json!({"multi_match": {"query": "bob"}}));
    }

    #[test]
    fn test_geo_distance_strings() {
        let mut conditions = Conditions::new();
        conditions.geo_distance(Bucket::Must, "lat_lon", -23.5, -46.25, 100.0);
        assert_eq!(
            conditions.must()[0].to_value(),
            json!({"geo_distance": {"distance": "100km", "lat_lon": "-23.5,-46.25"}})
        );
    }

    #[test]
    fn test_build_nested_discrete_groups_per_field() {
        let mut conditions = Conditions::new();
        conditions
            .nest_value(ClauseKind::Term, "city", "rio".into())
            .nest_value(ClauseKind::Term, "city", "sp".into())
            .nest_value(ClauseKind::Term, "state", json!(["RJ", "SP"]).into());

        assert_eq!(
            conditions.build_nested(),
            vec![
                json!({"bool": {"should": [{"term": {"city": "rio"}}, {"term": {"city": "sp"}}]}}),
                json!({"bool": {"should": [{"term": {"state": "RJ"}}, {"term": {"state": "SP"}}]}}),
            ]
        );
    }

    #[test]
    fn test_nested_array_replaces_alternatives() {
        let mut conditions = Conditions::new();
        conditions
            .nest_value(ClauseKind::Term, "city", "rio".into())
            .nest_value(ClauseKind::Term, "city", json!(["sp", "bh"]).into())
            .nest_value(ClauseKind::Term, "city", "poa".into());

        assert_eq!(
            conditions.build_nested(),
            vec![json!({"bool": {"should": [
                {"term": {"city": "sp"}},
                {"term": {"city": "bh"}},
                {"term": {"city": "poa"}}
            ]}})]
        );
    }

    #[test]
    fn test_empty_options_add_no_clause() {
        let mut conditions = Conditions::new();
        conditions
            .push(Bucket::Must, ClauseKind::Term, "a", PredicateValue::Options(Map::new()))
            .push(Bucket::Should, ClauseKind::Match, "b", json!({}).into());

        assert!(conditions.must().is_empty());
        assert!(conditions.should().is_empty());
        assert!(conditions.is_empty());
    }

    #[test]
    fn test_build_nested_ranges_share_one_group() {
        let mut conditions = Conditions::new();
        conditions
            .nest_range("age", Some(json!(18)), Some(json!(30)))
            .nest_range("height", Some(json!(150)), Some(json!(190)))
            .nest_range("age", Some(json!(40)), Some(json!(50)));

        assert_eq!(
            conditions.build_nested(),
            vec![json!({"bool": {"should": [
                {"range": {"age": {"gte": 40, "lte": 50}}},
                {"range": {"height": {"gte": 150, "lte": 190}}}
            ]}})]
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut conditions = Conditions::new();
        conditions
            .push(Bucket::Must, ClauseKind::Term, "a", 1.into())
            .push(Bucket::Should, ClauseKind::Term, "b", 1.into())
            .exists(Bucket::Not, "c")
            .nest_value(ClauseKind::Term, "d", 1.into());
        assert!(!conditions.is_empty());

        conditions.reset();
        assert!(conditions.is_empty());
        assert!(conditions.fields().is_empty());
        assert!(conditions.build_nested().is_empty());
    }
}
