//! Writing graph text to disk.

use std::fs;
use std::path::Path;

use depgraph_error::{Error, Result};
use tracing::info;

/// Write `content` to `path`, creating missing parent directories.
pub fn write_graph(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::from(e)
                .with_operation("output::create_dir")
                .with_context("path", parent.display().to_string())
        })?;
    }
    fs::write(path, content).map_err(|e| {
        Error::from(e)
            .with_operation("output::write")
            .with_context("path", path.display().to_string())
    })?;
    info!(path = %path.display(), bytes = content.len(), "graph written");
    Ok(())
}
