//! Entity document model
//!
//! Wraps a `serde_yaml` mapping with the accessors the mappers need:
//! - Single-document parsing with empty/null rejection
//! - Dotted path lookup and insertion (`metadata.name`)
//! - Scalar-to-text coercion for names and identifiers
//!
//! Keys keep their insertion order on emit, so the field order a mapper
//! builds is the order the caller sees.

use crate::error::{ParseError, SerializeError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// A single catalog entity, parsed into an ordered YAML mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityDocument {
    root: Mapping,
}

impl EntityDocument {
    /// Create an empty document
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping
    #[inline]
    #[must_use]
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse exactly one YAML document whose root is a mapping
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut documents = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(content) {
            documents.push(Value::deserialize(doc)?);
        }

        documents.retain(|doc| !doc.is_null());
        if documents.len() > 1 {
            return Err(ParseError::MultipleDocuments(documents.len()));
        }

        match documents.pop() {
            None => Err(ParseError::Empty),
            Some(Value::Mapping(root)) => Ok(Self { root }),
            Some(other) => Err(ParseError::NotAMapping(node_type(&other))),
        }
    }

    /// Emit the document as block-style YAML
    ///
    /// Long scalars are never folded: output lines are not wrapped at any
    /// column limit.
    pub fn to_yaml(&self) -> Result<String, SerializeError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Borrow the root mapping
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Top-level field
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Whether a top-level field exists
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Remove a top-level field, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.remove(key)
    }

    /// Value at a dotted path
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Set value at a dotted path, creating intermediate mappings
    ///
    /// A non-mapping value sitting on the path is replaced by a mapping.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            let entry = current
                .entry(key(segment))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(map) = entry else {
                return;
            };
            current = map;
        }
        current.insert(key(last), value);
    }

    /// A top-level section such as `metadata` or `spec`, if it is a mapping
    #[inline]
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Mapping> {
        self.root.get(name).and_then(Value::as_mapping)
    }

    /// Top-level field coerced to text
    #[inline]
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(as_text)
    }

    /// Dotted path coerced to text
    #[inline]
    #[must_use]
    pub fn text_at(&self, path: &str) -> Option<String> {
        self.get_path(path).and_then(as_text)
    }

    /// Declared `kind`, as text
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<String> {
        self.text("kind")
    }
}

/// Mapping key for a field name
#[inline]
#[must_use]
pub fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

/// Coerce a scalar to text
///
/// Strings pass through; numbers and booleans use their YAML spelling.
/// Null, sequences and mappings yield `None`.
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => as_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Text of a field, treating empty strings as absent
#[inline]
#[must_use]
pub fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value.and_then(as_text).filter(|s| !s.is_empty())
}

/// Whether a value counts as set when a default would otherwise apply
///
/// Null, `false`, zero and the empty string are unset; every collection,
/// even an empty one, is set.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Whether a value carries content worth copying
///
/// Collections must be non-empty; scalars must be truthy.
#[must_use]
pub fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        other => is_truthy(other),
    }
}

/// Clone `value` when truthy, otherwise build the default
#[inline]
pub fn or_default(value: Option<&Value>, default: impl FnOnce() -> Value) -> Value {
    value.filter(|v| is_truthy(v)).cloned().unwrap_or_else(default)
}

fn node_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
