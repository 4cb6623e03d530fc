//! Dynamic values passed to capability initializers and methods

use crate::error::{Error, Result};
use crate::identity::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamic argument or return value for capability methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// No value / unit return
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value (coordinates, angles, seconds)
    Float(f64),
    /// String value (text, image keys)
    String(String),
    /// Handle to another actor
    Actor(ActorId),
    /// List of values (colors, tuples)
    List(Vec<Value>),
}

impl Value {
    /// Try to get this value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an actor handle
    pub fn as_actor(&self) -> Option<ActorId> {
        match self {
            Value::Actor(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Actor(_) => "actor",
            Value::List(_) => "list",
        }
    }

    /// Read a numeric argument at `index`, failing with a type error
    pub fn float_arg(args: &[Value], index: usize) -> Result<f64> {
        let value = args
            .get(index)
            .ok_or_else(|| Error::InvalidArgument(format!("missing argument #{}", index)))?;
        value.as_float().ok_or_else(|| Error::type_error("float", value))
    }

    /// Read a string argument at `index`, failing with a type error
    pub fn str_arg(args: &[Value], index: usize) -> Result<&str> {
        let value = args
            .get(index)
            .ok_or_else(|| Error::InvalidArgument(format!("missing argument #{}", index)))?;
        value.as_str().ok_or_else(|| Error::type_error("string", value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Actor(id) => write!(f, "{}", id),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, v) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<ActorId> for Value {
    fn from(id: ActorId) -> Self {
        Value::Actor(id)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::List(vec.into_iter().map(Into::into).collect())
    }
}
