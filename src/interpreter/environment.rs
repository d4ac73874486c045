use std::{
    collections::HashMap,
    rc::Rc,
};

use crate::{error::RuntimeError, interpreter::value::Value};

/// The live mapping of answer names to their current values.
///
/// Top-level names live in a flat map; dotted paths such as `A.answer` are
/// stored as nested records under the root name `A` and resolved through
/// member access, never through a flat `"A.answer"` key.
///
/// ## Usage
///
/// An `Environment` is created once per survey and reused for every
/// evaluation. It is written only through [`Environment::define`] and
/// [`Environment::set`]; the reactive model is its regular writer, and
/// evaluating an assignment binding is the only other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a top-level name, replacing any previous value.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Writes a value under a dotted path.
    ///
    /// A single segment behaves like [`Environment::define`]. For longer paths
    /// every intermediate segment is made a record: missing records are
    /// created, and a non-record value in the way is replaced by one.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::{environment::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.set("A.answer", "Yes");
    /// env.set("A.score", 3);
    ///
    /// assert_eq!(env.resolve_path("A.answer"), Some(Value::from("Yes")));
    /// assert_eq!(env.resolve_path("A.score"), Some(Value::from(3)));
    /// ```
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut segments = path.split('.');
        let root = segments.next().unwrap_or(path);
        let rest: Vec<&str> = segments.collect();

        if rest.is_empty() {
            self.define(root, value);
            return;
        }

        let slot = self.variables
                       .entry(root.to_string())
                       .or_insert_with(|| Value::Record(Rc::default()));
        assign_nested(slot, &rest, value);
    }

    /// Looks up a top-level name.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] when the name is not bound.
    pub fn get(&self, name: &str, position: usize) -> Result<&Value, RuntimeError> {
        self.variables
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             position })
    }

    /// Looks up a top-level name without treating absence as an error.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Resolves a dotted path.
    ///
    /// Returns `None` when the root name is unbound, and `Some(Value::Missing)`
    /// when the root exists but a nested property does not.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let root = self.lookup(segments.next()?)?;
        Some(root.resolve(segments))
    }

    /// Returns `true` when the top-level name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Number of top-level names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over top-level bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        let mut entries: Vec<_> = self.variables.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            env.define(name, value);
        }
        env
    }
}

fn assign_nested(slot: &mut Value, path: &[&str], value: Value) {
    let Some((head, tail)) = path.split_first() else {
        *slot = value;
        return;
    };

    if !matches!(slot, Value::Record(_)) {
        *slot = Value::Record(Rc::default());
    }
    if let Value::Record(fields) = slot {
        let child = Rc::make_mut(fields).entry((*head).to_string())
                                        .or_insert(Value::Missing);
        assign_nested(child, tail, value);
    }
}
