//! Model result record.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model result as supplied by the caller: arbitrary named fields.
///
/// No schema is enforced. The store adds `createdAt` when saving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelResult {
    fields: Map<String, Value>,
}

impl ModelResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result from any value that serializes to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, AppError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(AppError::InvalidRecord(format!(
                "expected an object, got {}",
                value_kind(&other)
            ))),
            Err(e) => Err(AppError::InvalidRecord(e.to_string())),
        }
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for ModelResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Detection {
        score: f64,
        label: String,
    }

    #[test]
    fn test_from_struct() {
        let result = ModelResult::from_serializable(&Detection {
            score: 0.87,
            label: "clean".to_string(),
        })
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("score"), Some(&json!(0.87)));
        assert_eq!(result.get("label"), Some(&json!("clean")));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = ModelResult::from_serializable(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord(_)));
        assert_eq!(
            err.to_string(),
            "Invalid model result: expected an object, got an array"
        );
    }

    #[test]
    fn test_builder_and_serialization() {
        let result = ModelResult::new()
            .with("score", 0.5)
            .with("label", "overflow");

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"score": 0.5, "label": "overflow"}));
    }
}
