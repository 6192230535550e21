//! Artifact filters applied during traversal.
//!
//! Patterns use the token order `groupId:artifactId:type:classifier:version`.
//! Each token may contain `*` wildcards; missing trailing tokens match anything.

use std::fmt;

use regex::Regex;

use depgraph_error::{Error, Result};

use crate::artifact::Artifact;

/// Decides whether an artifact takes part in the graph.
pub trait ArtifactFilter {
    fn include(&self, artifact: &Artifact) -> bool;
}

impl<F> ArtifactFilter for F
where
    F: Fn(&Artifact) -> bool,
{
    fn include(&self, artifact: &Artifact) -> bool {
        self(artifact)
    }
}

/// Accepts everything. An `AndArtifactFilter` without members behaves the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ArtifactFilter for AcceptAll {
    fn include(&self, _artifact: &Artifact) -> bool {
        true
    }
}

/// Accepts an artifact only if every member filter accepts it.
#[derive(Default)]
pub struct AndArtifactFilter {
    filters: Vec<Box<dyn ArtifactFilter>>,
}

impl AndArtifactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: impl ArtifactFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl ArtifactFilter for AndArtifactFilter {
    fn include(&self, artifact: &Artifact) -> bool {
        self.filters.iter().all(|f| f.include(artifact))
    }
}

/// Scope filter with the usual build-tool semantics.
///
/// - `compile`: compile, provided and system
/// - `runtime`: compile and runtime
/// - `test`: everything
/// - `provided`, `system`: only themselves
///
/// Artifacts without a scope are always included.
#[derive(Debug, Clone)]
pub struct ScopeArtifactFilter {
    scope: String,
}

impl ScopeArtifactFilter {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl ArtifactFilter for ScopeArtifactFilter {
    fn include(&self, artifact: &Artifact) -> bool {
        let scope = artifact.scope();
        if scope.is_empty() {
            return true;
        }
        match self.scope.as_str() {
            "compile" => matches!(scope, "compile" | "provided" | "system"),
            "runtime" => matches!(scope, "compile" | "runtime"),
            "test" => true,
            other => other == scope,
        }
    }
}

/// A compiled `group:artifact:type:classifier:version` glob.
#[derive(Clone)]
pub struct ArtifactPattern {
    source: String,
    tokens: Vec<Option<Regex>>,
}

impl ArtifactPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.trim().split(':').collect();
        if parts.len() > 5 {
            return Err(Error::invalid_argument(format!(
                "artifact pattern '{pattern}' has more than 5 tokens"
            ))
            .with_operation("filter::parse_pattern"));
        }

        let mut tokens = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() || part == "*" {
                tokens.push(None);
                continue;
            }
            let escaped: Vec<String> = part.split('*').map(regex::escape).collect();
            let regex = Regex::new(&format!("^{}$", escaped.join(".*"))).map_err(|e| {
                Error::invalid_argument(format!("invalid artifact pattern '{pattern}'"))
                    .with_operation("filter::parse_pattern")
                    .set_source(e)
            })?;
            tokens.push(Some(regex));
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        let values = [
            artifact.group_id(),
            artifact.artifact_id(),
            artifact.artifact_type(),
            artifact.classifier(),
            artifact.version(),
        ];
        self.tokens
            .iter()
            .zip(values)
            .all(|(token, value)| token.as_ref().is_none_or(|re| re.is_match(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArtifactPattern").field(&self.source).finish()
    }
}

fn parse_patterns(patterns: &[String]) -> Result<Vec<ArtifactPattern>> {
    patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| ArtifactPattern::parse(p))
        .collect()
}

/// Accepts artifacts matching at least one pattern.
#[derive(Debug, Clone)]
pub struct StrictPatternIncludesArtifactFilter {
    patterns: Vec<ArtifactPattern>,
}

impl StrictPatternIncludesArtifactFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: parse_patterns(patterns)?,
        })
    }
}

impl ArtifactFilter for StrictPatternIncludesArtifactFilter {
    fn include(&self, artifact: &Artifact) -> bool {
        self.patterns.iter().any(|p| p.matches(artifact))
    }
}

/// Rejects artifacts matching any pattern.
#[derive(Debug, Clone)]
pub struct StrictPatternExcludesArtifactFilter {
    patterns: Vec<ArtifactPattern>,
}

impl StrictPatternExcludesArtifactFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: parse_patterns(patterns)?,
        })
    }
}

impl ArtifactFilter for StrictPatternExcludesArtifactFilter {
    fn include(&self, artifact: &Artifact) -> bool {
        !self.patterns.iter().any(|p| p.matches(artifact))
    }
}
