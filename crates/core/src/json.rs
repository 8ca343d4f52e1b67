//! The engine's value tree.
//!
//! Every response body, and every failure payload, is a [`Value`] tree. Objects keep
//! keys in insertion order so a response reads back in the order the engine wrote it.

use crate::error::{Error, Result};

/// A node of the value tree.
///
/// Numbers carry no integer/float tag; see [`crate::convert`] for how they are classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Number.
    Number(f64),
    /// Ordered key/value map.
    Object(Object),
    /// Ordered list.
    Array(Array),
    /// Boolean true.
    True,
    /// Boolean false.
    False,
    /// Null.
    Null,
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::True | Value::False => "bool",
            Value::Null => "null",
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string, or a structural error naming `what`.
    pub fn as_str(&self, what: &str) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(mismatch(what, "string", other)),
        }
    }

    /// Returns the number, or a structural error naming `what`.
    pub fn as_number(&self, what: &str) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(mismatch(what, "number", other)),
        }
    }

    /// Returns the object, or a structural error naming `what`.
    pub fn as_object(&self, what: &str) -> Result<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(mismatch(what, "object", other)),
        }
    }

    /// Returns the array, or a structural error naming `what`.
    pub fn as_array(&self, what: &str) -> Result<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(mismatch(what, "array", other)),
        }
    }
}

fn mismatch(what: &str, expected: &str, found: &Value) -> Error {
    Error::Structure(format!(
        "expected `{}` to be {}, found {}",
        what,
        expected,
        found.kind()
    ))
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(Array { values })
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Ordered key/value map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    /// Entries in insertion order.
    pub values: Vec<(String, Value)>,
}

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key, value)),
        }
    }

    /// Builder-style [`Object::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if the key is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Looks up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| Error::Structure(format!("missing field `{}`", key)))
    }

    /// Looks up a string field.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.require(key)?.as_str(key)
    }

    /// Looks up a number field.
    pub fn get_number(&self, key: &str) -> Result<f64> {
        self.require(key)?.as_number(key)
    }

    /// Looks up an object field.
    pub fn get_object(&self, key: &str) -> Result<&Object> {
        self.require(key)?.as_object(key)
    }

    /// Looks up an array field.
    pub fn get_array(&self, key: &str) -> Result<&Array> {
        self.require(key)?.as_array(key)
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    /// Elements in order.
    pub values: Vec<Value>,
}

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Element at `index`, or a structural error if out of range.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| {
            Error::Structure(format!(
                "index {} out of range for array of length {}",
                index,
                self.values.len()
            ))
        })
    }

    /// Iterates elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array {
            values: iter.into_iter().collect(),
        }
    }
}
