//! Property values and their runtime types
//!
//! Values are a closed tagged union. Object values are handles, so equality
//! on them is identity, not structure.

use crate::object::Object;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A property value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit null (distinct from an unassigned slot)
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Immutable string
    Str(Arc<str>),
    /// List of values
    List(Vec<Value>),
    /// Shared object handle
    Object(Object),
}

/// Runtime type of a value, or the element type of a slot or dynamic store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueType {
    /// Accepts every value
    #[default]
    Any,
    /// Null
    Null,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Float
    Float,
    /// String
    Str,
    /// List
    List,
    /// Object
    Object,
}

impl ValueType {
    /// Check whether a value of type `actual` may be stored under `self`.
    ///
    /// `Any` takes everything; `Float` also takes `Int` (widened on write).
    pub fn is_assignable_from(self, actual: ValueType) -> bool {
        match (self, actual) {
            (ValueType::Any, _) => true,
            (ValueType::Float, ValueType::Int) => true,
            (expected, actual) => expected == actual,
        }
    }

    /// Convert `value` for storage under `self`.
    ///
    /// Returns the rejected value's type on failure.
    pub fn coerce(self, value: Value) -> Result<Value, ValueType> {
        let actual = value.value_type();
        match (self, value) {
            (ValueType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (expected, value) if expected.is_assignable_from(actual) => Ok(value),
            _ => Err(actual),
        }
    }

    /// Combine two element types: equal types survive, anything else is `Any`
    pub fn unify(self, other: ValueType) -> ValueType {
        if self == other { self } else { ValueType::Any }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Any => "Any",
            ValueType::Null => "Null",
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Str => "Str",
            ValueType::List => "List",
            ValueType::Object => "Object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a string value
    pub fn str(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }

    /// Runtime type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Check for null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float (integers are widened)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as object handle
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<&Object> for Value {
    fn from(obj: &Object) -> Self {
        Value::Object(obj.clone())
    }
}
