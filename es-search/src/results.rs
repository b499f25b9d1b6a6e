use serde::Serialize;
use serde_json::{Map, Value};

/// One mapped hit.
///
/// Serializes flat: projected fields sit next to `id` and `score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub score: Option<f64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Map<String, Value>>,
}

impl Document {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub documents: Vec<Document>,
    pub total: Value,
    pub max_score: Value,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Maps a raw search response, `None` when it has no `hits.hits` list
pub fn map_response(response: &Value) -> Option<SearchResults> {
    let hits = response.get("hits")?;
    let documents = hits.get("hits")?.as_array()?.iter().map(map_hit).collect();

    Some(SearchResults {
        documents,
        total: hits.get("total").cloned().unwrap_or(Value::Null),
        max_score: hits.get("max_score").cloned().unwrap_or(Value::Null),
    })
}

/// Maps a single hit.
///
/// An explicit `fields` projection wins over `_source`; the two are never
/// merged.
pub fn map_hit(hit: &Value) -> Document {
    let projected = hit
        .get("fields")
        .and_then(Value::as_object)
        .or_else(|| hit.get("_source").and_then(Value::as_object));

    let fields = projected
        .map(|values| {
            values
                .iter()
                .map(|(name, value)| (name.clone(), first_of(value)))
                .collect()
        })
        .unwrap_or_default();

    let highlight = hit.get("highlight").and_then(Value::as_object).map(|fragments| {
        fragments
            .iter()
            .map(|(name, value)| (name.clone(), first_of(value)))
            .collect()
    });

    Document {
        id: hit_id(hit),
        score: hit.get("_score").and_then(Value::as_f64),
        fields,
        sort: hit.get("sort").cloned(),
        highlight,
    }
}

fn hit_id(hit: &Value) -> String {
    match hit.get("_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// Arrays collapse to their first element (null when empty)
fn first_of(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}
