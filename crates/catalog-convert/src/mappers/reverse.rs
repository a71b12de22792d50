//! Dialect 2 → dialect 1 mappers
//!
//! Output field order is `apiVersion, kind, metadata, spec`. Explicit fields
//! are written first and residual `metadata`/`spec` keys are copied after
//! them without overwriting.

use super::{
    copy_absent, copy_present, empty_string, expect_kind, field, normalize_definition,
    EXPLICIT_METADATA_FIELDS,
};
use crate::document::{is_non_empty, is_truthy, key, non_empty_text, or_default, EntityDocument};
use crate::error::MappingError;
use crate::identifier::{identifier_to_name, sanitize_name};
use crate::kind::{Dialect, Direction, EntityKind};
use serde_yaml::{Mapping, Value};

/// Namespace every dialect-1 entity is placed in
pub const DEFAULT_NAMESPACE: &str = "default";

/// Component spec fields copied ahead of the generic passthrough
pub const COMPONENT_SPEC_FIELDS: &[&str] = &["lifecycle", "system", "domain", "providesApis"];

/// Name a dialect-2 document resolves to: `name`, else its identifier
#[must_use]
pub fn resolved_name(doc: &EntityDocument) -> String {
    non_empty_text(doc.get("name"))
        .unwrap_or_else(|| identifier_to_name(non_empty_text(doc.get("identifier")).as_deref()))
}

fn metadata(doc: &EntityDocument, kind: EntityKind) -> Mapping {
    let source = doc.section("metadata");
    let name = resolved_name(doc);

    let mut metadata = Mapping::new();
    metadata.insert(key("name"), Value::String(sanitize_name(Some(&name))));
    if kind == EntityKind::Template {
        let title = non_empty_text(doc.get("name")).unwrap_or(name);
        metadata.insert(key("title"), Value::String(title));
    }
    metadata.insert(key("namespace"), key(DEFAULT_NAMESPACE));

    if let Some(description) = field(source, "description").filter(|v| is_truthy(v)) {
        metadata.insert(key("description"), description.clone());
    }

    let policy = kind.rules().annotations(Direction::Reverse);
    let annotations = policy.apply(field(source, "annotations"));
    if !annotations.is_empty() {
        metadata.insert(key("annotations"), Value::Mapping(annotations));
    }

    for list in ["tags", "links"] {
        if let Some(value) = field(source, list).filter(|v| is_non_empty(v)) {
            metadata.insert(key(list), value.clone());
        }
    }

    copy_absent(&mut metadata, source, EXPLICIT_METADATA_FIELDS);
    metadata
}

fn base_spec(doc: &EntityDocument) -> Mapping {
    let mut spec = Mapping::new();
    spec.insert(key("owner"), or_default(doc.get("owner"), empty_string));
    spec.insert(key("type"), or_default(doc.get("type"), empty_string));
    spec
}

fn envelope(kind: EntityKind, metadata: Mapping, spec: Mapping) -> Mapping {
    let mut out = Mapping::new();
    out.insert(key("apiVersion"), key(kind.api_version(Dialect::V1)));
    out.insert(key("kind"), key(kind.literal(Dialect::V1)));
    out.insert(key("metadata"), Value::Mapping(metadata));
    out.insert(key("spec"), Value::Mapping(spec));
    out
}

/// Workflow → Template
pub fn workflow(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Template;
    expect_kind(doc, kind, Dialect::V2)?;

    let mut spec = base_spec(doc);
    copy_absent(&mut spec, doc.section("spec"), &[]);

    Ok(envelope(kind, metadata(doc, kind), spec))
}

/// API → API
pub fn api(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Api;
    expect_kind(doc, kind, Dialect::V2)?;

    let mut spec = base_spec(doc);
    copy_absent(&mut spec, doc.section("spec"), &[]);
    normalize_definition(&mut spec);

    Ok(envelope(kind, metadata(doc, kind), spec))
}

/// Resource → Resource
pub fn resource(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Resource;
    expect_kind(doc, kind, Dialect::V2)?;

    let mut spec = base_spec(doc);
    copy_absent(&mut spec, doc.section("spec"), &[]);

    Ok(envelope(kind, metadata(doc, kind), spec))
}

/// Component → Component
pub fn component(doc: &EntityDocument) -> Result<Mapping, MappingError> {
    let kind = EntityKind::Component;
    expect_kind(doc, kind, Dialect::V2)?;

    let source_spec = doc.section("spec");
    let mut spec = base_spec(doc);
    copy_present(&mut spec, source_spec, COMPONENT_SPEC_FIELDS);
    copy_absent(&mut spec, source_spec, &[]);

    Ok(envelope(kind, metadata(doc, kind), spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> EntityDocument {
        EntityDocument::parse(yaml).unwrap()
    }

    fn section<'a>(out: &'a Mapping, name: &str) -> &'a Mapping {
        out.get(name).and_then(Value::as_mapping).unwrap()
    }

    fn keys(map: &Mapping) -> Vec<&str> {
        map.keys().filter_map(Value::as_str).collect()
    }

    #[test]
    fn name_falls_back_to_identifier() {
        assert_eq!(resolved_name(&doc("identifier: stocopy2\n")), "stocopy2");
        assert_eq!(resolved_name(&doc("name: ''\nidentifier: stocopy2\n")), "stocopy2");
        assert_eq!(resolved_name(&doc("kind: API\n")), "unknown");
    }

    #[test]
    fn component_spec_order() {
        let out = component(&doc(
            r#"
kind: Component
type: service
identifier: stocopy2
owner: Harness_Account_All_Users
spec:
  dependsOn: ['resource:db']
  system: hyperworkspace
  lifecycle: experimental
"#,
        ))
        .unwrap();

        assert_eq!(
            keys(section(&out, "spec")),
            vec!["owner", "type", "lifecycle", "system", "dependsOn"]
        );
        assert_eq!(out.get("apiVersion"), Some(&key("backstage.io/v1alpha1")));
    }

    #[test]
    fn explicit_spec_fields_win_over_passthrough() {
        let out = resource(&doc(
            r#"
kind: Resource
owner: team-a
type: database
spec:
  owner: someone-else
  system: portal
"#,
        ))
        .unwrap();

        let spec = section(&out, "spec");
        assert_eq!(spec.get("owner"), Some(&key("team-a")));
        assert_eq!(spec.get("system"), Some(&key("portal")));
    }

    #[test]
    fn empty_collections_are_omitted() {
        let out = api(&doc(
            r#"
kind: API
name: petstore
metadata:
  annotations: {}
  tags: []
  links: []
"#,
        ))
        .unwrap();

        assert_eq!(keys(section(&out, "metadata")), vec!["name", "namespace"]);
    }

    #[test]
    fn custom_metadata_passes_through_without_overwriting() {
        let out = component(&doc(
            r#"
kind: Component
identifier: svc
metadata:
  namespace: elsewhere
  codeCoverageScore: 60
"#,
        ))
        .unwrap();

        let metadata = section(&out, "metadata");
        assert_eq!(metadata.get("namespace"), Some(&key("default")));
        assert_eq!(metadata.get("codeCoverageScore"), Some(&Value::Number(60.into())));
    }

    #[test]
    fn workflow_becomes_template() {
        let out = workflow(&doc(
            r#"
kind: Workflow
name: Create JAVA based new service
identifier: create_java_based_new_service
type: service
owner: backend-group
spec:
  lifecycle: production
  steps:
    - id: trigger
"#,
        ))
        .unwrap();

        assert_eq!(out.get("kind"), Some(&key("Template")));
        assert_eq!(out.get("apiVersion"), Some(&key("scaffolder.backstage.io/v1beta3")));
        let metadata = section(&out, "metadata");
        assert_eq!(metadata.get("name"), Some(&key("Create-JAVA-based-new-service")));
        assert_eq!(metadata.get("title"), Some(&key("Create JAVA based new service")));
        assert_eq!(
            keys(section(&out, "spec")),
            vec!["owner", "type", "lifecycle", "steps"]
        );
    }

    #[test]
    fn template_kind_is_rejected_on_reverse_path() {
        let err = workflow(&doc("kind: Template\n")).unwrap_err();
        assert_eq!(err, MappingError::invalid_kind("Workflow", "Template"));
    }
}
