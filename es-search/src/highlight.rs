use serde_json::{json, Map, Value};

pub const PRE_TAG: &str = "<em>";
pub const POST_TAG: &str = "</em>";
pub const FRAGMENT_SIZE: u32 = 2000;
pub const NUMBER_OF_FRAGMENTS: u32 = 1;

/// Whether a request may carry a highlight section.
///
/// `Enabled` only makes highlighting eligible: it is emitted when the query
/// also registered the fields it searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Enabled,
    Disabled,
}

impl Highlight {
    pub fn should_highlight(&self) -> bool {
        matches!(self, Highlight::Enabled)
    }
}

impl From<bool> for Highlight {
    fn from(enabled: bool) -> Self {
        if enabled {
            Highlight::Enabled
        } else {
            Highlight::Disabled
        }
    }
}

/// Highlight section covering `fields`, one fragment per field
pub fn build_highlight<'a>(fields: impl IntoIterator<Item = &'a String>) -> Value {
    let mut per_field = Map::new();
    for field in fields {
        per_field.insert(
            field.clone(),
            json!({
                "fragment_size": FRAGMENT_SIZE,
                "number_of_fragments": NUMBER_OF_FRAGMENTS,
            }),
        );
    }

    json!({
        "pre_tags": PRE_TAG,
        "post_tags": POST_TAG,
        "fields": per_field,
    })
}

/// Highlight section with engine defaults for every field, used by
/// function-score searches
pub fn build_plain_highlight<'a>(fields: impl IntoIterator<Item = &'a String>) -> Value {
    let per_field: Map<String, Value> = fields
        .into_iter()
        .map(|field| (field.clone(), json!({})))
        .collect();

    json!({
        "pre_tags": PRE_TAG,
        "post_tags": POST_TAG,
        "fields": per_field,
    })
}
