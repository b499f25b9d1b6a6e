use crate::error::SearchError;
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// Pseudo-field compiled into a geo-distance sort
pub const PROXIMITY: &str = "proximity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(SearchError::Precondition(format!(
                "Invalid sort order: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SortEntry {
    field: String,
    value: Value,
}

/// Ordered `field -> direction` entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    entries: Vec<SortEntry>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_order(&mut self, field: &str, order: SortOrder) {
        self.push(field, json!(order.to_string()));
    }

    /// Raw entry; for [`PROXIMITY`] the value is the `"lat,lon"` origin or null
    pub fn push(&mut self, field: &str, value: Value) {
        self.entries.push(SortEntry {
            field: field.to_string(),
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Compiles the sort section.
    ///
    /// A single ordinary entry is returned as a bare `{field: direction}`.
    /// Anything else becomes a list in call order, with proximity entries
    /// turned into `_geo_distance` sorts on `geo_attribute` and the ones
    /// without an origin dropped.
    pub fn build(&self, geo_attribute: &str) -> Value {
        if let [only] = self.entries.as_slice() {
            if only.field != PROXIMITY {
                return single(&only.field, only.value.clone());
            }
        }

        let mut sort = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.field != PROXIMITY {
                sort.push(single(&entry.field, entry.value.clone()));
                continue;
            }
            if entry.value.is_null() {
                continue;
            }

            let mut geo = Map::new();
            geo.insert(geo_attribute.to_string(), entry.value.clone());
            geo.insert("order".to_string(), json!("asc"));
            geo.insert("unit".to_string(), json!("km"));
            geo.insert("mode".to_string(), json!("min"));
            geo.insert("distance_type".to_string(), json!("arc"));
            sort.push(json!({ "_geo_distance": geo }));
        }

        Value::Array(sort)
    }
}

fn single(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_is_bare() {
        let mut sort = SortSpec::new();
        sort.push_order("created_at", SortOrder::Desc);
        assert_eq!(sort.build("lat_lon"), json!({"created_at": "desc"}));
    }

    #[test]
    fn test_entries_keep_call_order() {
        let mut sort = SortSpec::new();
        sort.push_order("b", SortOrder::Asc);
        sort.push_order("a", SortOrder::Desc);
        assert_eq!(sort.build("lat_lon"), json!([{"b": "asc"}, {"a": "desc"}]));
    }

    #[test]
    fn test_lone_proximity_without_origin_is_empty_list() {
        let mut sort = SortSpec::new();
        sort.push(PROXIMITY, Value::Null);
        assert_eq!(sort.build("lat_lon"), json!([]));
    }

    #[test]
    fn test_proximity_becomes_geo_distance() {
        let mut sort = SortSpec::new();
        sort.push(PROXIMITY, json!("-23.5,-46.6"));
        sort.push_order("name", SortOrder::Asc);
        sort.push(PROXIMITY, Value::Null);

        assert_eq!(
            sort.build("location"),
            json!([
                {"_geo_distance": {
                    "location": "-23.5,-46.6",
                    "order": "asc",
                    "unit": "km",
                    "mode": "min",
                    "distance_type": "arc"
                }},
                {"name": "asc"}
            ])
        );
    }

    #[test]
    fn test_build_does_not_consume() {
        let mut sort = SortSpec::new();
        sort.push_order("a", SortOrder::Asc);
        sort.push_order("b", SortOrder::Asc);
        assert_eq!(sort.build("lat_lon"), sort.build("lat_lon"));
        assert_eq!(sort.len(), 2);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
