//! depgraph command-line interface.
//!
pub mod goals;
pub mod options;
pub mod output;
pub mod report;

use std::path::PathBuf;

use depgraph_error::Result;

pub use options::{Command, GraphOptions, OutputFormat};
pub use report::DependencyReport;

/// Load the report, create the graph and write it. Returns the output path.
pub fn run_command(command: &Command) -> Result<PathBuf> {
    let options = command.options();
    let report = DependencyReport::load(&options.report)?;
    let graph = goals::create_graph(command, &report)?;

    let path = options.output_path();
    output::write_graph(&path, &graph)?;
    Ok(path)
}
