//! Catalog entity dialect converter
//!
//! Converts a single catalog entity between the nested `metadata`/`spec`
//! layout (dialect 1, `backstage.io/v1alpha1`) and the flattened layout
//! (dialect 2, `harness.io/v1`).
//!
//! # Core Operations
//!
//! - **Parse**: YAML text into an [`EntityDocument`]
//! - **Map**: one per-kind mapper selected through [`EntityKind::rules`]
//! - **Emit**: the converted document back to YAML
//!
//! # Architecture
//!
//! ```text
//! text → EntityDocument → KindRules { forward | reverse } → EntityDocument → text
//!                               ↑
//!                  AnnotationPolicy (per kind, per direction)
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_convert::{convert, Direction};
//!
//! let v1 = convert(
//!     "kind: Component\nidentifier: stocopy2\ntype: service\nowner: team-a\n",
//!     Direction::Reverse,
//! )?;
//! assert!(v1.contains("namespace: default"));
//! # Ok::<(), catalog_convert::ConversionError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod annotations;
pub mod convert;
pub mod document;
pub mod error;
pub mod identifier;
pub mod kind;
pub mod mappers;

// Re-exports for convenience
pub use annotations::AnnotationPolicy;
pub use convert::{convert, convert_value, convert_with_flag};
pub use document::EntityDocument;
pub use error::{
    ConversionError, ConversionResult, InvalidDirection, MappingError, ParseError, SerializeError,
};
pub use identifier::{identifier_to_name, sanitize_name, to_identifier};
pub use kind::{Dialect, Direction, EntityKind, KindRules};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the converter
    pub use crate::document::EntityDocument;
    pub use crate::error::{ConversionError, ConversionResult};
    pub use crate::kind::{Direction, EntityKind};
    pub use crate::{convert, convert_with_flag};
}
