//! Conversion entry points
//!
//! ```text
//! text → EntityDocument → [strip relations] → KindRules mapper → [name/namespace fixups] → text
//! ```

use crate::document::{key, EntityDocument};
use crate::error::{ConversionResult, MappingError};
use crate::identifier::sanitize_name;
use crate::kind::{Direction, EntityKind};
use crate::mappers::reverse::{resolved_name, DEFAULT_NAMESPACE};
use serde_yaml::Value;

/// Top-level field dropped from dialect-2 input before reverse mapping
pub const RELATIONS: &str = "relations";

/// Convert a document between dialects
///
/// # Errors
/// Returns [`crate::ConversionError`] when the input does not parse to a
/// single mapping, declares an unsupported kind, or cannot be emitted.
///
/// # Example
///
/// ```rust
/// use catalog_convert::{convert, Direction};
///
/// let v2 = convert(
///     "kind: Component\nmetadata:\n  name: Artist Lookup\nspec:\n  type: service\n",
///     Direction::Forward,
/// )?;
/// assert!(v2.contains("identifier: artistlookup"));
/// # Ok::<(), catalog_convert::ConversionError>(())
/// ```
pub fn convert(raw: &str, direction: Direction) -> ConversionResult<String> {
    let doc = EntityDocument::parse(raw)?;
    let converted = convert_value(doc, direction)?;
    Ok(converted.to_yaml()?)
}

/// Convert using a textual direction flag (`forward`/`1to2`, `reverse`/`2to1`)
pub fn convert_with_flag(raw: &str, flag: &str) -> ConversionResult<String> {
    let direction: Direction = flag.parse()?;
    convert(raw, direction)
}

/// Convert an already parsed document
pub fn convert_value(mut doc: EntityDocument, direction: Direction) -> Result<EntityDocument, MappingError> {
    if direction == Direction::Reverse && doc.remove(RELATIONS).is_some() {
        tracing::trace!("stripped relations from dialect-2 input");
    }

    let kind = EntityKind::resolve(&doc, direction)?;
    tracing::debug!(
        kind = kind.literal(direction.source()),
        %direction,
        "converting {} → {}",
        direction.source(),
        direction.target()
    );

    let mapper = kind.rules().mapper(direction);
    let mut converted = EntityDocument::from_mapping(mapper(&doc)?);

    if direction == Direction::Reverse {
        ensure_v1_identity(&mut converted, &doc);
    }

    Ok(converted)
}

/// Guarantee a sanitized `metadata.name` and a `metadata.namespace`
fn ensure_v1_identity(converted: &mut EntityDocument, source: &EntityDocument) {
    let name = converted
        .text_at("metadata.name")
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| resolved_name(source));
    converted.set_path("metadata.name", Value::String(sanitize_name(Some(&name))));

    let has_namespace = converted
        .get_path("metadata.namespace")
        .is_some_and(crate::document::is_truthy);
    if !has_namespace {
        converted.set_path("metadata.namespace", key(DEFAULT_NAMESPACE));
    }
}
