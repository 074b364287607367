use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Declared type of an attribute.
pub enum AttributeType {
    Boolean,
    /// Closed category set; values are matched by exact string equality.
    Enumerated(Vec<String>),
}

impl AttributeType {
    /// Build an enumerated type from any list of category names.
    pub fn enumerated<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeType::Enumerated(values.into_iter().map(Into::into).collect())
    }

    /// Check whether `value` is legal for this type.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (AttributeType::Boolean, Value::Bool(_)) => true,
            (AttributeType::Enumerated(legal), Value::Category(category)) => {
                legal.iter().any(|v| v == category)
            }
            _ => false,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            AttributeType::Boolean => "a boolean".to_string(),
            AttributeType::Enumerated(legal) => format!("one of [{}]", legal.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
/// A concrete attribute value.
pub enum Value {
    Bool(bool),
    Category(String),
}

impl Value {
    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Category(_) => None,
        }
    }

    /// The category name, if this is an enumerated value.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Category(c) => Some(c),
            Value::Bool(_) => None,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Bool(b) => format!("boolean {b}"),
            Value::Category(c) => format!("category '{c}'"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Category(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Category(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Category(c) => write!(f, "{c}"),
        }
    }
}
