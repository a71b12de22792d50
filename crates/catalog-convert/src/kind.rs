//! Entity kinds, dialects and the per-kind dispatch table

use crate::annotations::{AnnotationPolicy, MANAGED_PROVENANCE, SOURCE_LOCATION_ONLY};
use crate::document::EntityDocument;
use crate::error::{InvalidDirection, MappingError};
use crate::mappers::{forward, reverse};
use serde_yaml::Mapping;
use std::fmt;
use std::str::FromStr;

/// `apiVersion` carried by every dialect-2 document
pub const V2_API_VERSION: &str = "harness.io/v1";

/// `apiVersion` of dialect-1 catalog entities
pub const V1_API_VERSION: &str = "backstage.io/v1alpha1";

/// `apiVersion` of dialect-1 scaffolder templates
pub const V1_TEMPLATE_API_VERSION: &str = "scaffolder.backstage.io/v1beta3";

/// Schema dialect of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Nested `metadata`/`spec` layout
    V1,
    /// Flattened top-level layout
    V2,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("IDP 1.0"),
            Self::V2 => f.write_str("IDP 2.0"),
        }
    }
}

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Dialect 1 → dialect 2
    Forward,
    /// Dialect 2 → dialect 1
    Reverse,
}

impl Direction {
    /// Dialect the input is expected in
    #[inline]
    #[must_use]
    pub fn source(self) -> Dialect {
        match self {
            Self::Forward => Dialect::V1,
            Self::Reverse => Dialect::V2,
        }
    }

    /// Dialect the output is produced in
    #[inline]
    #[must_use]
    pub fn target(self) -> Dialect {
        match self {
            Self::Forward => Dialect::V2,
            Self::Reverse => Dialect::V1,
        }
    }

    /// Conventional file name for a converted document
    #[inline]
    #[must_use]
    pub fn output_file_name(self) -> &'static str {
        match self {
            Self::Forward => "converted_idp2.yaml",
            Self::Reverse => "converted_idp1.yaml",
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "1to2" => Ok(Self::Forward),
            "reverse" | "2to1" => Ok(Self::Reverse),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Reverse => f.write_str("reverse"),
        }
    }
}

/// Category of catalog entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Service, website, library
    Component,
    /// API definition
    Api,
    /// Infrastructure resource
    Resource,
    /// Scaffolder template (dialect 1) / workflow (dialect 2)
    Template,
}

/// Signature shared by every per-kind mapper
pub type MapperFn = fn(&EntityDocument) -> Result<Mapping, MappingError>;

/// Transformation rules for one entity kind
#[derive(Debug, Clone, Copy)]
pub struct KindRules {
    /// Kind these rules belong to
    pub kind: EntityKind,
    /// Dialect 1 → dialect 2 mapper
    pub forward: MapperFn,
    /// Dialect 2 → dialect 1 mapper
    pub reverse: MapperFn,
    /// Annotation policy applied on the forward path
    pub forward_annotations: AnnotationPolicy,
    /// Annotation policy applied on the reverse path
    pub reverse_annotations: AnnotationPolicy,
}

impl KindRules {
    /// Mapper for a direction
    #[inline]
    #[must_use]
    pub fn mapper(&self, direction: Direction) -> MapperFn {
        match direction {
            Direction::Forward => self.forward,
            Direction::Reverse => self.reverse,
        }
    }

    /// Annotation policy for a direction
    #[inline]
    #[must_use]
    pub fn annotations(&self, direction: Direction) -> AnnotationPolicy {
        match direction {
            Direction::Forward => self.forward_annotations,
            Direction::Reverse => self.reverse_annotations,
        }
    }
}

static COMPONENT_RULES: KindRules = KindRules {
    kind: EntityKind::Component,
    forward: forward::component,
    reverse: reverse::component,
    forward_annotations: AnnotationPolicy::Deny(MANAGED_PROVENANCE),
    reverse_annotations: AnnotationPolicy::PassThrough,
};

static API_RULES: KindRules = KindRules {
    kind: EntityKind::Api,
    forward: forward::api,
    reverse: reverse::api,
    forward_annotations: AnnotationPolicy::AllowOnly(SOURCE_LOCATION_ONLY),
    reverse_annotations: AnnotationPolicy::PassThrough,
};

static RESOURCE_RULES: KindRules = KindRules {
    kind: EntityKind::Resource,
    forward: forward::resource,
    reverse: reverse::resource,
    forward_annotations: AnnotationPolicy::AllowOnly(SOURCE_LOCATION_ONLY),
    reverse_annotations: AnnotationPolicy::PassThrough,
};

static TEMPLATE_RULES: KindRules = KindRules {
    kind: EntityKind::Template,
    forward: forward::template,
    reverse: reverse::workflow,
    forward_annotations: AnnotationPolicy::AllowOnly(SOURCE_LOCATION_ONLY),
    reverse_annotations: AnnotationPolicy::PassThrough,
};

impl EntityKind {
    /// Kinds in the order the dialect-1 dispatcher reports them
    pub const V1_ORDER: [EntityKind; 4] = [Self::Component, Self::Template, Self::Api, Self::Resource];

    /// Kinds in the order the dialect-2 dispatcher reports them
    pub const V2_ORDER: [EntityKind; 4] = [Self::Template, Self::Api, Self::Resource, Self::Component];

    /// Kind literal used by a dialect
    #[must_use]
    pub fn literal(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (Self::Component, _) => "Component",
            (Self::Api, _) => "API",
            (Self::Resource, _) => "Resource",
            (Self::Template, Dialect::V1) => "Template",
            (Self::Template, Dialect::V2) => "Workflow",
        }
    }

    /// Resolve a kind literal within a dialect
    #[must_use]
    pub fn from_literal(literal: &str, dialect: Dialect) -> Option<Self> {
        Self::ordered(dialect)
            .into_iter()
            .find(|kind| kind.literal(dialect) == literal)
    }

    /// Supported kinds of a dialect, in reporting order
    #[inline]
    #[must_use]
    pub fn ordered(dialect: Dialect) -> [EntityKind; 4] {
        match dialect {
            Dialect::V1 => Self::V1_ORDER,
            Dialect::V2 => Self::V2_ORDER,
        }
    }

    /// Kind literals accepted as input for a dialect
    #[must_use]
    pub fn supported_literals(dialect: Dialect) -> Vec<&'static str> {
        Self::ordered(dialect)
            .into_iter()
            .map(|kind| kind.literal(dialect))
            .collect()
    }

    /// `apiVersion` this kind carries in a dialect
    #[must_use]
    pub fn api_version(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (_, Dialect::V2) => V2_API_VERSION,
            (Self::Template, Dialect::V1) => V1_TEMPLATE_API_VERSION,
            (_, Dialect::V1) => V1_API_VERSION,
        }
    }

    /// Transformation rules for this kind
    #[inline]
    #[must_use]
    pub fn rules(self) -> &'static KindRules {
        match self {
            Self::Component => &COMPONENT_RULES,
            Self::Api => &API_RULES,
            Self::Resource => &RESOURCE_RULES,
            Self::Template => &TEMPLATE_RULES,
        }
    }

    /// Resolve the declared kind of a source document
    pub fn resolve(doc: &EntityDocument, direction: Direction) -> Result<Self, MappingError> {
        let dialect = direction.source();
        let declared = doc.kind().unwrap_or_else(|| "undefined".to_string());
        match Self::from_literal(&declared, dialect) {
            Some(kind) => Ok(kind),
            None => Err(MappingError::unsupported_kind(
                declared,
                &Self::supported_literals(dialect),
            )),
        }
    }
}
