//! Verdict normalization.
//!
//! Coerces a loosely-typed verdict object into canonical field types. Every
//! function here is total: unusable input falls back to a documented default
//! instead of failing.
//!
//! | Field        | Accepted input                               | Fallback    |
//! |--------------|----------------------------------------------|-------------|
//! | `sentiment`  | any non-null value, strings verbatim         | `"Unknown"` |
//! | `category`   | any non-null value, strings verbatim         | `"Unknown"` |
//! | `importance` | integers, floats (truncated), numeric strings | `0`        |
//! | `isHighRisk` | booleans, `1`, `"true"/"yes"/"false"/"no"`   | `false`     |
//!
//! The same coercions are used when a stored record is read back, so the
//! write path and the read path agree on canonical values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::labels::UNKNOWN;

/// Key for the sentiment field in a model verdict.
pub const SENTIMENT_KEY: &str = "sentiment";
/// Key for the category field in a model verdict.
pub const CATEGORY_KEY: &str = "category";
/// Key for the importance field in a model verdict.
pub const IMPORTANCE_KEY: &str = "importance";
/// Key for the high-risk flag in a model verdict.
pub const HIGH_RISK_KEY: &str = "isHighRisk";

/// Keys a well-formed verdict is expected to carry.
pub const EXPECTED_KEYS: [&str; 4] = [SENTIMENT_KEY, CATEGORY_KEY, IMPORTANCE_KEY, HIGH_RISK_KEY];

/// A normalized model verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub sentiment: String,
    pub category: String,
    pub importance: i64,
    #[serde(rename = "isHighRisk")]
    pub is_high_risk: bool,
}

impl Verdict {
    /// Renders the verdict back into the object shape the model emits.
    pub fn to_object(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert(SENTIMENT_KEY.to_string(), Value::from(self.sentiment.clone()));
        obj.insert(CATEGORY_KEY.to_string(), Value::from(self.category.clone()));
        obj.insert(IMPORTANCE_KEY.to_string(), Value::from(self.importance));
        obj.insert(HIGH_RISK_KEY.to_string(), Value::from(self.is_high_risk));
        obj
    }
}

/// Normalizes an extracted verdict object. Never fails.
pub fn normalize(obj: &Map<String, Value>) -> Verdict {
    Verdict {
        sentiment: coerce_label(obj.get(SENTIMENT_KEY)),
        category: coerce_label(obj.get(CATEGORY_KEY)),
        importance: coerce_importance(obj.get(IMPORTANCE_KEY)),
        is_high_risk: coerce_risk(obj.get(HIGH_RISK_KEY)),
    }
}

/// Expected keys absent from `obj`.
pub fn missing_keys(obj: &Map<String, Value>) -> Vec<&'static str> {
    EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|key| !obj.contains_key(*key))
        .collect()
}

/// Label fields pass through; absent or null values become `"Unknown"`.
pub fn coerce_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Integer coercion with `0` as the "not assessed" fallback.
pub fn coerce_importance(value: Option<&Value>) -> i64 {
    coerce_integer(value)
}

/// Integers pass through, floats truncate, numeric strings parse and booleans
/// count as `1`/`0`; anything else is `0`.
pub fn coerce_integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// Boolean coercion with `false` as the fallback.
pub fn coerce_risk(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => parse_risk_word(s).unwrap_or(false),
        _ => false,
    }
}

/// Recognized truthy / falsy words, case-insensitive.
pub fn parse_risk_word(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}
