//! Dialect 1 → dialect 2 mappers
//!
//! Output field order is `apiVersion, kind, type, identifier, name, owner,
//! spec, metadata`. `spec.owner` and `spec.type` are hoisted to the top
//! level and never repeated under `spec`.

use super::{
    copy_absent, copy_present, empty_sequence, empty_string, expect_kind, field, normalize_definition,
    PROMOTED_SPEC_FIELDS,
};
use crate::document::{is_truthy, key, non_empty_text, or_default, EntityDocument};
use crate::error::MappingError;
use crate::identifier::{to_identifier, UNKNOWN};
use crate::kind::{Dialect, Direction, EntityKind};
use serde_yaml::{Mapping, Value};

/// Custom component metadata carried into dialect 2
///
/// Everything else under `metadata` (notably `uid` and `etag`) is dropped.
pub const COMPONENT_METADATA_FIELDS: &[&str] = &[
    "codeCoverageScore",
    "harnessData",
    "releaseVersion",
    "customField",
    "coverage",
    "projectIdentifier",
    "orgIdentifier",
    "branch",
    "version",
    "teamLead",
    "customTags",
];

/// Component spec fields placed before the generic passthrough
pub const COMPONENT_SPEC_FIELDS: &[&str] = &["lifecycle", "providesApis", "domain", "system"];

/// The only spec fields a resource keeps
pub const RESOURCE_SPEC_FIELDS: &[&str] = &["lifecycle", "system"];

/// Source-side view shared by the forward mappers
struct Source<'a> {
    doc: &'a EntityDocument,
    metadata: Option<&'a Mapping>,
    spec: Option<&'a Mapping>,
}

impl<'a> Source<'a> {
    fn new(doc: &'a EntityDocument, kind: EntityKind) -> Result<Self, MappingError> {
        expect_kind(doc, kind, Dialect::V1)?;
        Ok(Self {
            doc,
            metadata: doc.section("metadata"),
            spec: doc.section("spec"),
        })
    }

    fn name(&self) -> Option<String> {
        non_empty_text(field(self.metadata, "name"))
    }

    fn identifier(&self) -> String {
        to_identifier(self.name().as_deref())
    }

    fn annotations(&self, kind: EntityKind) -> Value {
        let policy = kind.rules().annotations(Direction::Forward);
        Value::Mapping(policy.apply(field(self.metadata, "annotations")))
    }

    fn list(&self, name: &str) -> Value {
        or_default(field(self.metadata, name), empty_sequence)
    }

    fn copy_description(&self, metadata: &mut Mapping) {
        if let Some(description) = field(self.metadata, "description").filter(|v| is_truthy(v)) {
            metadata.insert(key("description"), description.clone());
        }
    }
}

/// Assemble the dialect-2 top-level layout
fn envelope(source: &Source<'_>, kind: EntityKind, identifier: String, name: Value, spec: Mapping, metadata: Mapping) -> Mapping {
    let mut out = Mapping::new();
    out.insert(key("apiVersion"), key(kind.api_version(Dialect::V2)));
    out.insert(key("kind"), key(kind.literal(Dialect::V2)));
    out.insert(key("type"), or_default(field(source.spec, "type"), empty_string));
    out.insert(key("identifier"), Value::String(identifier));
    out.insert(key("name"), name);
    out.insert(key("owner"), or_default(field(source.spec, "owner"), empty_string));
    out.insert(key("spec"), Value::Mapping(spec));
    out.insert(key("metadata"), Value::Mapping(metadata));

    tracing::trace!(
        kind = kind.literal(Dialect::V1),
        source_keys = source.doc.root().len(),
        "built dialect-2 envelope"
    );
    out
}

/// Component → Component
///
/// The dialect-2 `name` is the slug, not the human name.
pub fn component(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Component;
    let source = Source::new(doc, kind)?;

    let mut metadata = Mapping::new();
    metadata.insert(key("annotations"), source.annotations(kind));
    metadata.insert(key("links"), source.list("links"));
    metadata.insert(key("tags"), source.list("tags"));
    copy_present(&mut metadata, source.metadata, COMPONENT_METADATA_FIELDS);

    let mut spec = Mapping::new();
    copy_present(&mut spec, source.spec, COMPONENT_SPEC_FIELDS);
    copy_absent(&mut spec, source.spec, PROMOTED_SPEC_FIELDS);

    let identifier = source.identifier();
    let name = Value::String(identifier.clone());
    Ok(envelope(&source, kind, identifier, name, spec, metadata))
}

/// API → API
pub fn api(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Api;
    let source = Source::new(doc, kind)?;

    let mut metadata = Mapping::new();
    metadata.insert(
        key("description"),
        or_default(field(source.metadata, "description"), empty_string),
    );
    metadata.insert(key("annotations"), source.annotations(kind));
    metadata.insert(key("links"), source.list("links"));
    metadata.insert(key("tags"), source.list("tags"));

    let mut spec = Mapping::new();
    copy_absent(&mut spec, source.spec, PROMOTED_SPEC_FIELDS);
    normalize_definition(&mut spec);

    let name = Value::String(source.name().unwrap_or_else(|| UNKNOWN.to_string()));
    Ok(envelope(&source, kind, source.identifier(), name, spec, metadata))
}

/// Resource → Resource
pub fn resource(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Resource;
    let source = Source::new(doc, kind)?;

    let mut metadata = Mapping::new();
    metadata.insert(key("annotations"), source.annotations(kind));
    metadata.insert(key("tags"), source.list("tags"));
    source.copy_description(&mut metadata);

    let mut spec = Mapping::new();
    copy_present(&mut spec, source.spec, RESOURCE_SPEC_FIELDS);

    let identifier = source.identifier();
    let name = Value::String(identifier.clone());
    Ok(envelope(&source, kind, identifier, name, spec, metadata))
}

/// Template → Workflow
///
/// `parameters`, `steps` and `output` move across verbatim.
pub fn template(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Template;
    let source = Source::new(doc, kind)?;

    let mut metadata = Mapping::new();
    metadata.insert(key("annotations"), source.annotations(kind));
    metadata.insert(key("tags"), source.list("tags"));
    source.copy_description(&mut metadata);

    let mut spec = Mapping::new();
    copy_absent(&mut spec, source.spec, PROMOTED_SPEC_FIELDS);

    let name = non_empty_text(field(source.metadata, "title"))
        .or_else(|| source.name())
        .unwrap_or_else(|| UNKNOWN.to_string());
    Ok(envelope(&source, kind, source.identifier(), Value::String(name), spec, metadata))
}
