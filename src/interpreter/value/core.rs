use std::{collections::BTreeMap, rc::Rc};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// Answers written by the reactive model, literals in conditions and the
/// results of evaluation are all `Value`s. Arrays and records are reference
/// counted, so cloning a value out of the environment is cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A text value.
    String(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An ordered collection of values.
    Array(Rc<Vec<Self>>),
    /// A nested record, reached through member access (`A.answer`).
    Record(Rc<BTreeMap<String, Self>>),
    /// The result of reading a property that does not exist.
    ///
    /// `Missing` is falsy, equals only itself and makes every ordering
    /// comparison `false`.
    Missing,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(v: BTreeMap<String, Self>) -> Self {
        Self::Record(Rc::new(v))
    }
}

impl Value {
    /// Builds a record from `(property, value)` pairs.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::value::Value;
    ///
    /// let participant = Value::record([("answer", Value::from(25))]);
    ///
    /// assert_eq!(participant.property("answer"), Value::Number(25.0));
    /// assert_eq!(participant.property("age"), Value::Missing);
    /// ```
    pub fn record<K, I>(fields: I) -> Self
        where K: Into<String>,
              I: IntoIterator<Item = (K, Self)>
    {
        Self::Record(Rc::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()))
    }

    /// Builds an array value from anything convertible into values.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::value::Value;
    ///
    /// let themes = Value::array(["dark", "contrast"]);
    /// assert_eq!(themes.to_string(), "dark, contrast");
    /// ```
    pub fn array<T, I>(items: I) -> Self
        where T: Into<Self>,
              I: IntoIterator<Item = T>
    {
        Self::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Reads a property of a record.
    ///
    /// Any lookup that cannot succeed (not a record, no such property, or the
    /// value is already `Missing`) yields [`Value::Missing`].
    #[must_use]
    pub fn property(&self, name: &str) -> Self {
        match self {
            Self::Record(fields) => fields.get(name).cloned().unwrap_or(Self::Missing),
            _ => Self::Missing,
        }
    }

    /// Follows a path of property names from this value.
    #[must_use]
    pub fn resolve<'a, I>(&self, path: I) -> Self
        where I: IntoIterator<Item = &'a str>
    {
        path.into_iter().fold(self.clone(), |value, segment| value.property(segment))
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `position`: Source offset for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::TypeError)`: Otherwise.
    pub fn as_number(&self, position: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::TypeError { details: format!("expected a number, found {}",
                                                                self.type_name()),
                                               position }),
        }
    }

    /// Returns the truthiness of the value.
    ///
    /// `false`, `0`, `NaN`, the empty string and `Missing` are falsy;
    /// everything else, including empty arrays and records, is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Record(_) => true,
            Self::Missing => false,
        }
    }

    /// Returns `true` for the [`Value::Missing`] sentinel.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Name of the value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
            Self::Missing => "missing value",
        }
    }
}
