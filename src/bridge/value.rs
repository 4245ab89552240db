//! bridge::value
//!
//! Dynamically typed values passed to and returned from commit methods.
//!
//! Callers that only hold untyped data (JSON from the command line, a
//! scripting host) go through [`Value`]. Extraction helpers check the
//! shape and either return an owned/borrowed typed value or a
//! [`BridgeError::TypeMismatch`].

use std::collections::BTreeMap;

use serde_json::json;

use super::BridgeError;
use crate::core::person::Person;
use crate::core::types::Oid;
use crate::object::Object;

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Person(Person),
    Object(Object),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Person(_) => "Person",
            Value::Object(object) => object.type_name(),
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrow the text of a string value.
    pub fn expect_str(&self) -> Result<&str, BridgeError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(BridgeError::type_mismatch("string", other.type_name())),
        }
    }

    /// A non-negative integer.
    pub fn expect_u64(&self) -> Result<u64, BridgeError> {
        match self {
            Value::UInt(n) => Ok(*n),
            Value::Int(n) => u64::try_from(*n)
                .map_err(|_| BridgeError::type_mismatch("non-negative integer", "negative integer")),
            other => Err(BridgeError::type_mismatch("integer", other.type_name())),
        }
    }

    /// Extract a person.
    ///
    /// Accepts a [`Value::Person`] or a map with text `name`, text `email`
    /// and a non-negative integer `time`. The fields are copied, so the
    /// result never borrows from `self`.
    pub fn expect_person(&self) -> Result<Person, BridgeError> {
        match self {
            Value::Person(person) => Ok(person.clone()),
            Value::Map(fields) => {
                let field = |key: &str| {
                    fields.get(key).ok_or_else(|| {
                        BridgeError::type_mismatch("Person", format!("map without '{}'", key))
                    })
                };
                let name = field("name")?.expect_str()?;
                let email = field("email")?.expect_str()?;
                let time = field("time")?.expect_u64()?;
                Ok(Person::new(name, email, time))
            }
            other => Err(BridgeError::type_mismatch("Person", other.type_name())),
        }
    }

    /// Borrow a bridged object.
    pub fn expect_object(&self) -> Result<&Object, BridgeError> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(BridgeError::type_mismatch("Object", other.type_name())),
        }
    }

    /// Extract an object id, given either as hex text or as a stored object.
    pub fn expect_oid(&self) -> Result<Oid, BridgeError> {
        match self {
            Value::Str(hex) => Oid::new(hex.as_str())
                .map_err(|e| BridgeError::type_mismatch("object id", e.to_string())),
            Value::Object(object) => object.id().cloned().ok_or_else(|| {
                BridgeError::NotInitialized(format!(
                    "{} has not been written",
                    object.type_name()
                ))
            }),
            other => Err(BridgeError::type_mismatch(
                "object id or Object",
                other.type_name(),
            )),
        }
    }

    /// Render as JSON.
    ///
    /// Objects render as `{"kind": ..., "id": ...}`; an unwritten commit
    /// has a `null` id.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(n) => json!(n),
            Value::UInt(n) => json!(n),
            Value::Float(f) => json!(f),
            Value::Str(s) => json!(s),
            Value::Person(p) => json!({
                "name": p.name(),
                "email": p.email(),
                "time": p.time(),
            }),
            Value::Object(object) => json!({
                "kind": object.kind().as_str(),
                "id": object.id().map(Oid::as_str),
            }),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::UInt(n)
    }
}

impl From<Person> for Value {
    fn from(p: Person) -> Self {
        Value::Person(p)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
