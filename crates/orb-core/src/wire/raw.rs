//! Raw key/value storage for not-yet-typed wire objects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationResult};
use crate::wire::model::Model;

/// An ordered string-keyed map of raw wire values.
///
/// This is the one place keyed access to untyped JSON is implemented:
/// required and optional reads, typed writes, and promotion to a checked
/// [`Model`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawObject(Map<String, Value>);

impl RawObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, failing unless it is an object.
    pub fn from_value(value: Value, model: &'static str) -> ValidationResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::Decode {
                model,
                message: format!("expected a JSON object, found {}", kind_of(&other)),
            }),
        }
    }

    /// Serialize a typed value into its raw form.
    pub fn from_model<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(serde::ser::Error::custom(format!(
                "expected a JSON object, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Read a required field.
    ///
    /// Absent and `null` are both reported as missing.
    pub fn get_required<T: DeserializeOwned>(
        &self,
        model: &'static str,
        key: &str,
    ) -> ValidationResult<T> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(ValidationError::MissingField {
                model,
                field: key.to_string(),
            }),
            Some(value) => decode_field(model, key, value),
        }
    }

    /// Read an optional field; absent and `null` both yield `None`.
    pub fn get_optional<T: DeserializeOwned>(
        &self,
        model: &'static str,
        key: &str,
    ) -> ValidationResult<Option<T>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode_field(model, key, value).map(Some),
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous entry.
    pub fn set<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        self.0.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Store a raw JSON value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Raw access to one entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present and not `null`.
    pub fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Copy every entry of `other` into this object; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Check required fields, decode, then validate as `T`.
    pub fn into_model<T: Model>(self) -> ValidationResult<T> {
        self.check_required::<T>()?;
        let model: T =
            serde_json::from_value(Value::Object(self.0)).map_err(|e| ValidationError::Decode {
                model: T::NAME,
                message: e.to_string(),
            })?;
        model.validate()?;
        Ok(model)
    }

    /// Report the first required field of `T` that is absent or `null`.
    pub fn check_required<T: Model>(&self) -> ValidationResult<()> {
        match T::REQUIRED_FIELDS.iter().find(|key| !self.has(key)) {
            Some(key) => Err(ValidationError::MissingField {
                model: T::NAME,
                field: (*key).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawObject> for Value {
    fn from(raw: RawObject) -> Self {
        raw.into_value()
    }
}

fn decode_field<T: DeserializeOwned>(
    model: &'static str,
    key: &str,
    value: &Value,
) -> ValidationResult<T> {
    T::deserialize(value).map_err(|e| ValidationError::Decode {
        model,
        message: format!("field `{key}`: {e}"),
    })
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
