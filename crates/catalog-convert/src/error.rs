//! Error types for catalog conversion
//!
//! Provides error handling for:
//! - Parse operations (text → entity document)
//! - Mapping operations (per-kind dialect transformation)
//! - Serialize operations (entity document → text)

/// Errors while reading the input document
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed YAML
    #[error("YAML parse error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// Input contained no document, or only a null one
    #[error("invalid YAML content: document is empty")]
    Empty,

    /// More than one document in the input stream
    #[error("expected a single document, found {0}")]
    MultipleDocuments(usize),

    /// Root node is a scalar or sequence
    #[error("expected a mapping at the document root, found {0}")]
    NotAMapping(&'static str),
}

/// Errors raised by the per-kind mappers and the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A mapper received a document of the wrong kind
    #[error("invalid entity or kind mismatch, expected {expected}, got '{found}'")]
    InvalidKind {
        /// Kind literal the mapper handles
        expected: &'static str,
        /// Kind literal found in the document
        found: String,
    },

    /// No mapper exists for the declared kind
    #[error("unsupported kind '{kind}'. Supported kinds: {supported}.")]
    UnsupportedKind {
        /// Kind literal found in the document
        kind: String,
        /// Comma separated list of accepted kinds
        supported: String,
    },
}

impl MappingError {
    /// Create kind mismatch error
    pub fn invalid_kind(expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidKind {
            expected,
            found: found.into(),
        }
    }

    /// Create unsupported kind error listing the accepted literals
    pub fn unsupported_kind(kind: impl Into<String>, supported: &[&str]) -> Self {
        Self::UnsupportedKind {
            kind: kind.into(),
            supported: supported.join(", "),
        }
    }
}

/// Errors while emitting the converted document
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Emitter failure
    #[error("YAML emit error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Direction flag that is neither forward nor reverse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid conversion direction: '{0}'")]
pub struct InvalidDirection(pub String);

/// Error surfaced at the conversion boundary
///
/// This is the only error type callers of [`crate::convert`] need to handle.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Input could not be read as a single entity document
    #[error("conversion error: {0}")]
    Parse(#[from] ParseError),

    /// Declared kind has no mapper, or a mapper saw the wrong kind
    #[error("conversion error: {0}")]
    Mapping(#[from] MappingError),

    /// Converted document could not be emitted
    #[error("conversion error: {0}")]
    Serialize(#[from] SerializeError),

    /// Direction flag was not recognized
    #[error("conversion error: {0}")]
    Direction(#[from] InvalidDirection),
}

impl ConversionError {
    /// Message of the wrapped error, without the boundary prefix
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Parse(e) => e.to_string(),
            Self::Mapping(e) => e.to_string(),
            Self::Serialize(e) => e.to_string(),
            Self::Direction(e) => e.to_string(),
        }
    }
}

/// Result type alias for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
