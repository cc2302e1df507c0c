use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

/// Errors produced while reading a `name=value` binding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("expected name=value, got '{input}'")]
    MissingEquals { input: String },

    #[error("'{name}' is not a valid identifier")]
    InvalidName { name: String },

    #[error("cannot bind '{name}': '{value}' is not a number")]
    InvalidValue { name: String, value: String },
}

/// Identifier bindings visible to the evaluator.
///
/// Scopes chain through `parent`; a name bound in a child scope shadows the
/// same name in any enclosing scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueEnv {
    parent: Option<Box<ValueEnv>>,
    symbols: HashMap<String, f64>,
}

impl ValueEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment with the built-in constants `pi`, `e` and `tau`
    pub fn with_prelude() -> Self {
        let mut env = Self::new();
        env.insert("pi".to_string(), std::f64::consts::PI);
        env.insert("e".to_string(), std::f64::consts::E);
        env.insert("tau".to_string(), std::f64::consts::TAU);
        env
    }

    pub fn with_parent(parent: ValueEnv) -> Self {
        ValueEnv {
            parent: Some(Box::new(parent)),
            symbols: HashMap::new(),
        }
    }

    /// Bind `name` in the current scope, returning the value it replaced there
    pub fn insert(&mut self, name: String, value: f64) -> Option<f64> {
        log::trace!("bind {name} = {value}");
        self.symbols.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match self.symbols.get(name) {
            Some(value) => Some(*value),
            None => self.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a binding from the current scope only. A shadowed binding in
    /// an enclosing scope becomes visible again.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.symbols.remove(name)
    }

    /// Every visible name, sorted and without duplicates
    pub fn names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut cur: Option<&ValueEnv> = Some(self);
        while let Some(env) = cur {
            seen.extend(env.symbols.keys().cloned());
            cur = env.parent.as_deref();
        }
        seen.into_iter().collect()
    }

    /// Visible `(name, value)` pairs sorted by name, child bindings winning
    pub fn bindings(&self) -> Vec<(String, f64)> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(&name).map(|value| (name, value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.parent.as_ref().map_or(true, |p| p.is_empty())
    }

    /// Apply a list of bindings in order; later entries overwrite earlier ones
    pub fn extend<I>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        for (name, value) in bindings {
            self.insert(name, value);
        }
    }
}

/// Returns true if `name` is spelled like an expression identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a `name=value` definition such as `rate=0.25`.
///
/// Whitespace around the name and the value is ignored. The name must be
/// a valid expression identifier; the value is any number Rust can parse
/// as `f64`, including a leading sign or an exponent.
pub fn parse_binding(input: &str) -> Result<(String, f64), BindingError> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| BindingError::MissingEquals {
            input: input.to_string(),
        })?;
    let name = name.trim();
    let value = value.trim();

    if !is_identifier(name) {
        return Err(BindingError::InvalidName {
            name: name.to_string(),
        });
    }
    let parsed = value
        .parse::<f64>()
        .map_err(|_| BindingError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })?;
    Ok((name.to_string(), parsed))
}

/// Parse a comma-separated list of bindings, skipping empty entries.
pub fn parse_bindings(list: &str) -> Result<Vec<(String, f64)>, BindingError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_binding)
        .collect()
}
