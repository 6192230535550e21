//! Error kinds for depgraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Every failure aborts the whole invocation, so the kind only tells the
/// caller *what* went wrong; there is no retry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Invalid configuration or parameters (e.g. negative font size)
    ConfigInvalid,

    /// A custom style resource does not exist
    StyleNotFound,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// The upstream resolver failed while building the dependency tree/graph
    GraphBuildFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Configuration errors are reported before any traversal starts.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ErrorKind::ConfigInvalid | ErrorKind::StyleNotFound)
    }
}
