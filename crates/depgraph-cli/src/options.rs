//! Command-line options shared by every goal.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Output format of the generated graph.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Dot,
    Gml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Gml => "gml",
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Dependency graph of a single project.
    Graph(GraphOptions),
    /// Dependencies aggregated by group id.
    #[command(name = "by-groupid")]
    ByGroupId(GraphOptions),
    /// One graph over all modules of a multi-module project.
    Aggregate(GraphOptions),
}

impl Command {
    pub fn options(&self) -> &GraphOptions {
        match self {
            Command::Graph(options) | Command::ByGroupId(options) | Command::Aggregate(options) => {
                options
            }
        }
    }
}

/// Options for graph creation.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphOptions {
    /// Resolved dependency report (JSON) of the project.
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Only include artifacts in this scope (compile, runtime, test, provided, system).
    #[arg(long)]
    pub scope: Option<String>,

    /// Comma separated `group:artifact:type:classifier:version` patterns to include.
    #[arg(long, value_delimiter = ',')]
    pub includes: Vec<String>,

    /// Comma separated patterns to exclude.
    #[arg(long, value_delimiter = ',')]
    pub excludes: Vec<String>,

    /// Only keep paths leading to artifacts matching these patterns.
    #[arg(long = "target-includes", value_delimiter = ',')]
    pub target_includes: Vec<String>,

    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Dot)]
    pub output_format: OutputFormat,

    /// Output file. Defaults to `target/dependency-graph.<format>`.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Style file layered over the built-in styles, or `builtin:<preset>`.
    #[arg(long = "custom-style-configuration", value_name = "RESOURCE")]
    pub custom_style_configuration: Option<String>,

    /// Log the effective style configuration.
    #[arg(long = "print-style-configuration")]
    pub print_style_configuration: bool,

    #[arg(long = "show-group-ids")]
    pub show_group_ids: bool,

    #[arg(long = "show-versions")]
    pub show_versions: bool,

    /// Include dependencies omitted as duplicates.
    #[arg(long = "show-duplicates")]
    pub show_duplicates: bool,

    /// Include dependencies omitted for version conflicts.
    #[arg(long = "show-conflicts")]
    pub show_conflicts: bool,

    /// One node per artifact regardless of its scopes.
    #[arg(long = "merge-scopes")]
    pub merge_scopes: bool,

    /// Connect aggregator projects to their modules.
    #[arg(long = "include-parent-projects")]
    pub include_parent_projects: bool,
}

impl GraphOptions {
    pub fn new(report: impl Into<PathBuf>) -> Self {
        Self {
            report: report.into(),
            ..Default::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_custom_style(mut self, resource: impl Into<String>) -> Self {
        self.custom_style_configuration = Some(resource.into());
        self
    }

    /// Where the graph is written.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from("target").join(format!("dependency-graph.{}", self.output_format.extension()))
        })
    }
}
