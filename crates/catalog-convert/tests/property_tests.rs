use catalog_convert::annotations::SOURCE_LOCATION;
use catalog_convert::document::key;
use catalog_convert::identifier::{MAX_IDENTIFIER_LEN, MAX_NAME_LEN};
use catalog_convert::{convert_value, sanitize_name, to_identifier, Direction, EntityDocument};
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().count() <= MAX_IDENTIFIER_LEN
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn is_sanitized_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars().count() <= MAX_NAME_LEN
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn mapping(entries: Vec<(&str, Value)>) -> Mapping {
    entries.into_iter().map(|(k, v)| (key(k), v)).collect()
}

proptest! {
    #[test]
    fn prop_identifier_charset(name in any::<String>()) {
        let id = to_identifier(Some(&name));
        prop_assert!(is_identifier(&id), "bad identifier {:?}", id);
    }

    #[test]
    fn prop_identifier_idempotent(name in any::<String>()) {
        let once = to_identifier(Some(&name));
        prop_assert_eq!(to_identifier(Some(&once)), once);
    }

    #[test]
    fn prop_sanitized_name_charset(name in any::<String>()) {
        let sanitized = sanitize_name(Some(&name));
        prop_assert!(is_sanitized_name(&sanitized), "bad name {:?}", sanitized);
        prop_assert_eq!(sanitize_name(Some(&sanitized)), sanitized);
    }

    #[test]
    fn prop_reverse_identity_invariants(
        kind in prop::sample::select(vec!["Component", "API", "Resource", "Workflow"]),
        name in proptest::option::of(any::<String>()),
        identifier in proptest::option::of("[a-z0-9_]{0,40}"),
        with_relations in any::<bool>(),
    ) {
        let mut root = mapping(vec![("kind", key(kind))]);
        if let Some(name) = name {
            root.insert(key("name"), Value::String(name));
        }
        if let Some(identifier) = identifier {
            root.insert(key("identifier"), Value::String(identifier));
        }
        if with_relations {
            root.insert(
                key("relations"),
                Value::Sequence(vec![Value::Mapping(mapping(vec![
                    ("type", key("ownedBy")),
                    ("targetRef", key("group:default/team-a")),
                ]))]),
            );
        }

        let out = convert_value(EntityDocument::from_mapping(root), Direction::Reverse).unwrap();

        let namespace = out.text_at("metadata.namespace");
        prop_assert_eq!(namespace.as_deref(), Some("default"));
        let name = out.text_at("metadata.name").unwrap_or_default();
        prop_assert!(is_sanitized_name(&name), "bad metadata.name {:?}", name);
        prop_assert!(!out.contains_key("relations"));
    }

    #[test]
    fn prop_forward_annotations_are_subset(
        kind in prop::sample::select(vec!["Component", "API", "Resource", "Template"]),
        extra in proptest::collection::btree_set("[a-z]{1,8}(\\.io/[a-z-]{1,12})?", 0..8),
        with_source_location in any::<bool>(),
    ) {
        let mut annotations = Mapping::new();
        for k in &extra {
            annotations.insert(key(k), key("value"));
        }
        if with_source_location {
            annotations.insert(key(SOURCE_LOCATION), key("url:https://example.com/repo"));
        }
        let root = mapping(vec![
            ("kind", key(kind)),
            ("metadata", Value::Mapping(mapping(vec![
                ("name", key("entity")),
                ("annotations", Value::Mapping(annotations.clone())),
            ]))),
        ]);

        let out = convert_value(EntityDocument::from_mapping(root), Direction::Forward).unwrap();
        let kept = out
            .get_path("metadata.annotations")
            .and_then(Value::as_mapping)
            .cloned()
            .unwrap_or_default();

        for k in kept.keys() {
            prop_assert!(annotations.contains_key(k));
        }
        if kind != "Component" {
            for k in kept.keys() {
                prop_assert_eq!(k.as_str(), Some(SOURCE_LOCATION));
            }
            prop_assert_eq!(kept.contains_key(SOURCE_LOCATION), with_source_location);
        }
    }
}
