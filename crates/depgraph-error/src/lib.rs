//! # depgraph-error
//!
//! Unified error handling for depgraph.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ConfigInvalid, GraphBuildFailed)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use depgraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ConfigInvalid, "negative font size")
//!         .with_operation("style::load")
//!         .with_context("resource", "custom-style.json"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All functions return `Result<T, depgraph_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using depgraph Error
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type handed back by external collaborators (resolvers).
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
