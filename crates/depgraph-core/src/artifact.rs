//! Artifact coordinates and resolution classification.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

const DEFAULT_TYPE: &str = "jar";

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

/// Coordinate of a dependency: `group:artifact:type[:classifier]:version[:scope]`.
///
/// Immutable once built. The scope belongs to one occurrence in the resolved
/// tree, so the same library may appear with different scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    classifier: String,
    #[serde(rename = "type", default = "default_type")]
    artifact_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    scope: String,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: String::new(),
            artifact_type: default_type(),
            scope: String::new(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

/// Join coordinate parts with `:`, skipping empty ones.
pub fn join_coordinates(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(':');
        }
        out.push_str(part);
    }
    out
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_coordinates(&[
            &self.group_id,
            &self.artifact_id,
            &self.artifact_type,
            &self.classifier,
            &self.version,
            &self.scope,
        ]))
    }
}

/// How the upstream resolver treated a node.
///
/// The set is defined by the resolver; depgraph only checks membership in the
/// caller's accepted set and never derives a classification itself.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeResolution {
    #[default]
    Included,
    OmittedForDuplicate,
    OmittedForConflict,
    OmittedForCycle,
}

impl NodeResolution {
    /// Every known classification.
    pub fn all() -> BTreeSet<NodeResolution> {
        NodeResolution::iter().collect()
    }

    pub fn is_omitted(&self) -> bool {
        !matches!(self, NodeResolution::Included)
    }
}
