//! Style cascade for dependency graphs.
//!
//! Style resources are JSON [`StyleLayer`]s. [`StyleConfiguration::load`] folds
//! the default resource and any additional ones into one effective layer, and
//! the renderers in this crate turn it into node and edge attributes.

pub mod config;
pub mod merge;
pub mod model;
pub mod renderer;

pub use config::{BuiltInStyleResource, StyleConfiguration, StyleResource};
pub use merge::Merge;
pub use model::{EdgeStyle, Font, FontSize, NodeRule, NodeShape, NodeStyle, StyleLayer};
pub use renderer::{DependencyEdgeAttributeRenderer, DependencyNodeAttributeRenderer};
