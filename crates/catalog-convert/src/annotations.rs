//! Annotation filtering policies
//!
//! Which annotation keys survive a conversion depends on the entity kind and
//! the direction. The per-kind choice lives in [`crate::kind::KindRules`];
//! this module only evaluates a policy against a mapping.

use serde_yaml::{Mapping, Value};

/// Source location annotation, the only key kept by the allow-list kinds
pub const SOURCE_LOCATION: &str = "backstage.io/source-location";

/// Keys kept for API, Resource and Template on the forward path
pub const SOURCE_LOCATION_ONLY: &[&str] = &[SOURCE_LOCATION];

/// Catalog-managed provenance keys that are meaningless after re-import
pub const MANAGED_PROVENANCE: &[&str] = &[
    "backstage.io/managed-by-location",
    "backstage.io/managed-by-origin-location",
    "backstage.io/view-url",
    "backstage.io/edit-url",
];

/// Rule deciding which annotation keys are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationPolicy {
    /// Keep only the listed keys
    AllowOnly(&'static [&'static str]),
    /// Keep everything except the listed keys
    Deny(&'static [&'static str]),
    /// Keep everything
    PassThrough,
}

impl AnnotationPolicy {
    /// Whether `key` survives this policy
    #[must_use]
    pub fn keeps(&self, key: &str) -> bool {
        match self {
            Self::AllowOnly(allowed) => allowed.contains(&key),
            Self::Deny(denied) => !denied.contains(&key),
            Self::PassThrough => true,
        }
    }

    /// Filter an annotations value, preserving key order
    ///
    /// Absent or non-mapping input yields an empty mapping. Non-string keys
    /// only survive [`AnnotationPolicy::PassThrough`].
    #[must_use]
    pub fn apply(&self, annotations: Option<&Value>) -> Mapping {
        let Some(source) = annotations.and_then(Value::as_mapping) else {
            return Mapping::new();
        };

        let mut kept = Mapping::new();
        for (k, v) in source {
            let keep = match k.as_str() {
                Some(name) => self.keeps(name),
                None => matches!(self, Self::PassThrough),
            };
            if keep {
                kept.insert(k.clone(), v.clone());
            } else {
                tracing::trace!(annotation = ?k, "dropping annotation");
            }
        }
        kept
    }
}
