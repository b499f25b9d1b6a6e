use serde_json::{Map, Value};
use std::fmt;

/// Clause types understood by the condition accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Term,
    Terms,
    Wildcard,
    Match,
    MatchPhrase,
    MatchPhrasePrefix,
    MultiMatch,
    Prefix,
    Range,
    Regexp,
    Fuzzy,
    FuzzyLike,
    Exists,
    GeoDistance,
}

impl ClauseKind {
    /// Name of the clause as the engine expects it on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Term => "term",
            ClauseKind::Terms => "terms",
            ClauseKind::Wildcard => "wildcard",
            ClauseKind::Match => "match",
            ClauseKind::MatchPhrase => "match_phrase",
            ClauseKind::MatchPhrasePrefix => "match_phrase_prefix",
            ClauseKind::MultiMatch => "multi_match",
            ClauseKind::Prefix => "prefix",
            ClauseKind::Range => "range",
            ClauseKind::Regexp => "regexp",
            ClauseKind::Fuzzy => "fuzzy",
            ClauseKind::FuzzyLike => "fuzzy_like_this",
            ClauseKind::Exists => "exists",
            ClauseKind::GeoDistance => "geo_distance",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One compiled predicate: `{ "<kind>": body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    kind: ClauseKind,
    body: Map<String, Value>,
}

impl Clause {
    pub fn new(kind: ClauseKind, body: Map<String, Value>) -> Self {
        Self { kind, body }
    }

    /// Clause whose body is a single `field: value` entry
    pub fn single(kind: ClauseKind, field: &str, value: Value) -> Self {
        let mut body = Map::new();
        body.insert(field.to_string(), value);
        Self::new(kind, body)
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.body
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            self.kind.as_str().to_string(),
            Value::Object(self.body.clone()),
        );
        Value::Object(map)
    }
}

impl From<Clause> for Value {
    fn from(clause: Clause) -> Self {
        let mut map = Map::new();
        map.insert(clause.kind.as_str().to_string(), Value::Object(clause.body));
        Value::Object(map)
    }
}

/// Argument of a predicate call.
///
/// A plain value produces a `field: value` clause, a mapping of named options
/// (`value`, `boost`, `fuzziness`, ...) is nested under the field instead.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Simple(Value),
    Options(Map<String, Value>),
}

impl PredicateValue {
    pub fn into_value(self) -> Value {
        match self {
            PredicateValue::Simple(value) => value,
            PredicateValue::Options(options) => Value::Object(options),
        }
    }
}

impl From<Value> for PredicateValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(options) => PredicateValue::Options(options),
            other => PredicateValue::Simple(other),
        }
    }
}

impl From<Map<String, Value>> for PredicateValue {
    fn from(options: Map<String, Value>) -> Self {
        PredicateValue::Options(options)
    }
}

macro_rules! simple_predicate_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PredicateValue {
                fn from(value: $ty) -> Self {
                    PredicateValue::Simple(Value::from(value))
                }
            }
        )*
    };
}

simple_predicate_value!(&str, String, bool, i32, i64, u32, u64, f64);

impl<T: Into<Value>> From<Vec<T>> for PredicateValue {
    fn from(values: Vec<T>) -> Self {
        PredicateValue::Simple(Value::Array(values.into_iter().map(Into::into).collect()))
    }
}

/// Which clause list a predicate is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Must,
    Should,
    Not,
}

/// Ordered list of field names.
///
/// Built from a string, both `,` and `;` separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<String>);

impl Fields {
    pub fn parse(fields: &str) -> Self {
        Fields(
            fields
                .split([',', ';'])
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }
}

impl From<&str> for Fields {
    fn from(fields: &str) -> Self {
        Fields::parse(fields)
    }
}

impl From<String> for Fields {
    fn from(fields: String) -> Self {
        Fields::parse(&fields)
    }
}

impl From<Vec<String>> for Fields {
    fn from(fields: Vec<String>) -> Self {
        Fields(fields)
    }
}

impl From<Vec<&str>> for Fields {
    fn from(fields: Vec<&str>) -> Self {
        Fields(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Fields {
    fn from(fields: &[&str]) -> Self {
        Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Fields {
    fn from(fields: [&str; N]) -> Self {
        Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

/// Field name without a trailing boost suffix (`title^2` -> `title`)
pub fn strip_boost(field: &str) -> &str {
    match field.split_once('^') {
        Some((name, _)) => name,
        None => field,
    }
}
