use serde_json::{json, Map, Value};

/// Default decay factor of a gaussian function
pub const DEFAULT_DECAY: f64 = 0.5;

/// How the scores of the individual functions are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMode {
    Multiply,
    #[default]
    Sum,
    Avg,
    First,
    Max,
    Min,
}

impl std::fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreMode::Multiply => write!(f, "multiply"),
            ScoreMode::Sum => write!(f, "sum"),
            ScoreMode::Avg => write!(f, "avg"),
            ScoreMode::First => write!(f, "first"),
            ScoreMode::Max => write!(f, "max"),
            ScoreMode::Min => write!(f, "min"),
        }
    }
}

/// How the combined function score is merged with the query score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoostMode {
    #[default]
    Multiply,
    Replace,
    Sum,
    Avg,
    Max,
    Min,
}

impl std::fmt::Display for BoostMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoostMode::Multiply => write!(f, "multiply"),
            BoostMode::Replace => write!(f, "replace"),
            BoostMode::Sum => write!(f, "sum"),
            BoostMode::Avg => write!(f, "avg"),
            BoostMode::Max => write!(f, "max"),
            BoostMode::Min => write!(f, "min"),
        }
    }
}

/// Gaussian decay over a geo, date or numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct GaussFunction {
    field: String,
    origin: Value,
    scale: String,
    offset: Option<String>,
    decay: f64,
    weight: Option<f64>,
}

impl GaussFunction {
    pub fn new(field: &str, origin: impl Into<Value>, scale: &str) -> Self {
        Self {
            field: field.to_string(),
            origin: origin.into(),
            scale: scale.to_string(),
            offset: None,
            decay: DEFAULT_DECAY,
            weight: None,
        }
    }

    /// Distance from the origin before decay starts
    pub fn with_offset(mut self, offset: &str) -> Self {
        self.offset = Some(offset.to_string());
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut params = Map::new();
        params.insert("origin".to_string(), self.origin.clone());
        params.insert("scale".to_string(), json!(self.scale));
        params.insert("decay".to_string(), json!(self.decay));
        if let Some(offset) = &self.offset {
            params.insert("offset".to_string(), json!(offset));
        }

        let mut gauss = Map::new();
        gauss.insert(self.field.clone(), Value::Object(params));

        let mut function = Map::new();
        function.insert("gauss".to_string(), Value::Object(gauss));
        if let Some(weight) = self.weight {
            function.insert("weight".to_string(), json!(weight));
        }
        Value::Object(function)
    }
}

/// Scoring functions accumulated for a `function_score` search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionScore {
    functions: Vec<Value>,
    score_mode: Option<ScoreMode>,
    boost_mode: Option<BoostMode>,
}

impl FunctionScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, function: Value) {
        self.functions.push(function);
    }

    pub fn add_gauss(&mut self, gauss: GaussFunction) {
        self.functions.push(gauss.to_value());
    }

    pub fn set_modes(&mut self, score_mode: ScoreMode, boost_mode: BoostMode) {
        self.score_mode = Some(score_mode);
        self.boost_mode = Some(boost_mode);
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.score_mode.is_none() && self.boost_mode.is_none()
    }

    pub fn clear(&mut self) {
        self.functions.clear();
        self.score_mode = None;
        self.boost_mode = None;
    }

    /// Wraps `query` in a `function_score` clause
    pub fn build(&self, query: Value) -> Value {
        let mut function_score = Map::new();
        function_score.insert("query".to_string(), query);
        function_score.insert("functions".to_string(), Value::Array(self.functions.clone()));
        if let Some(boost_mode) = self.boost_mode {
            function_score.insert("boost_mode".to_string(), json!(boost_mode.to_string()));
        }
        if let Some(score_mode) = self.score_mode {
            function_score.insert("score_mode".to_string(), json!(score_mode.to_string()));
        }
        json!({ "function_score": function_score })
    }
}
