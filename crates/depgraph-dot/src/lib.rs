//! DOT export for dependency graphs.
//!
//! - [`dot`]: DOT statement writer and helpers
//! - [`DotBuilder`]: the [`GraphBuilder`](depgraph_core::GraphBuilder) for DOT

mod builder;
pub mod dot;

pub use builder::DotBuilder;
