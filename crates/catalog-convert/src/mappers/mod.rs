//! Per-kind dialect mappers
//!
//! Each mapper turns one source document into the target dialect's field
//! layout. The mappers never touch text; parsing, dispatch and emit live in
//! [`crate::convert`].
//!
//! Explicitly mapped fields are inserted first. Residual fields are then
//! copied with [`copy_absent`], which never overwrites a key that is already
//! set.

pub mod forward;
pub mod reverse;

use crate::document::{key, EntityDocument};
use crate::error::MappingError;
use crate::kind::{Dialect, EntityKind};
use serde_yaml::{Mapping, Value};

/// Spec fields hoisted to the top level in dialect 2
pub const PROMOTED_SPEC_FIELDS: &[&str] = &["owner", "type"];

/// Metadata fields the reverse mappers place explicitly
pub const EXPLICIT_METADATA_FIELDS: &[&str] = &["annotations", "tags", "description", "links"];

/// Text value for the `$text` reference wrapper on API definitions
const DEFINITION_TEXT: &str = "$text";

/// Fail unless the document declares `kind` in `dialect`
pub fn expect_kind(doc: &EntityDocument, kind: EntityKind, dialect: Dialect) -> Result<(), MappingError> {
    let expected = kind.literal(dialect);
    match doc.kind() {
        Some(found) if found == expected => Ok(()),
        found => Err(MappingError::invalid_kind(
            expected,
            found.unwrap_or_else(|| "undefined".to_string()),
        )),
    }
}

/// Field of an optional section
#[inline]
#[must_use]
pub fn field<'a>(section: Option<&'a Mapping>, name: &str) -> Option<&'a Value> {
    section.and_then(|s| s.get(name))
}

/// Copy each listed field that is present in `source`
pub fn copy_present(target: &mut Mapping, source: Option<&Mapping>, fields: &[&str]) {
    let Some(source) = source else { return };
    for name in fields {
        if let Some(value) = source.get(*name) {
            target.insert(key(name), value.clone());
        }
    }
}

/// Copy every field of `source` not in `skip` and not already in `target`
pub fn copy_absent(target: &mut Mapping, source: Option<&Mapping>, skip: &[&str]) {
    let Some(source) = source else { return };
    for (k, v) in source {
        if k.as_str().is_some_and(|name| skip.contains(&name)) {
            continue;
        }
        if !target.contains_key(k) {
            target.insert(k.clone(), v.clone());
        }
    }
}

/// Reduce an API `definition` that references a file to its `$text` wrapper
///
/// A mapping with a set `$text` entry becomes exactly `{ $text: value }`;
/// anything else is left untouched.
pub fn normalize_definition(spec: &mut Mapping) {
    let Some(Value::Mapping(definition)) = spec.get_mut("definition") else {
        return;
    };
    let Some(text) = definition
        .get(DEFINITION_TEXT)
        .filter(|v| crate::document::is_truthy(v))
        .cloned()
    else {
        return;
    };

    let mut wrapper = Mapping::new();
    wrapper.insert(key(DEFINITION_TEXT), text);
    *definition = wrapper;
}

#[inline]
pub(crate) fn empty_sequence() -> Value {
    Value::Sequence(Vec::new())
}

#[inline]
pub(crate) fn empty_string() -> Value {
    Value::String(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn copy_absent_is_first_write_wins() {
        let mut target = mapping("owner: explicit\n");
        let source = mapping("owner: generic\nlifecycle: production\ntype: service\n");

        copy_absent(&mut target, Some(&source), &["type"]);

        assert_eq!(target.get("owner"), Some(&key("explicit")));
        assert_eq!(target.get("lifecycle"), Some(&key("production")));
        assert!(!target.contains_key("type"));
    }

    #[test]
    fn copy_present_skips_missing() {
        let mut target = Mapping::new();
        let source = mapping("system: portal\ndomain: ~\n");

        copy_present(&mut target, Some(&source), &["lifecycle", "system", "domain"]);

        assert!(!target.contains_key("lifecycle"));
        assert_eq!(target.get("system"), Some(&key("portal")));
        // present-but-null still counts as present
        assert_eq!(target.get("domain"), Some(&Value::Null));
    }

    #[test]
    fn definition_keeps_text_wrapper_only() {
        let mut spec = mapping("definition:\n  $text: ./petstore.oas.yaml\n  extra: dropped\n");
        normalize_definition(&mut spec);
        assert_eq!(spec, mapping("definition:\n  $text: ./petstore.oas.yaml\n"));
    }

    #[test]
    fn inline_definition_untouched() {
        let mut spec = mapping("definition: |\n  openapi: 3.0.0\n");
        let before = spec.clone();
        normalize_definition(&mut spec);
        assert_eq!(spec, before);

        let mut spec = mapping("definition:\n  openapi: 3.0.0\n");
        let before = spec.clone();
        normalize_definition(&mut spec);
        assert_eq!(spec, before);
    }

    #[test]
    fn expect_kind_reports_mismatch() {
        let doc = EntityDocument::parse("kind: Template\n").unwrap();
        assert!(expect_kind(&doc, EntityKind::Template, Dialect::V1).is_ok());
        assert_eq!(
            expect_kind(&doc, EntityKind::Template, Dialect::V2),
            Err(MappingError::invalid_kind("Workflow", "Template"))
        );
    }
}
