//! Wiring of filters, styles, builders and factories for each goal.

use std::collections::BTreeSet;
use std::rc::Rc;

use depgraph_core::{
    AggregatingGraphFactory, AndArtifactFilter, GraphBuilder, GraphBuilderAdapter, GraphConfig,
    GraphFactory, NodeNames, NodeResolution, ScopeArtifactFilter, SimpleGraphFactory,
    StrictPatternExcludesArtifactFilter, StrictPatternIncludesArtifactFilter,
};
use depgraph_dot::DotBuilder;
use depgraph_error::Result;
use depgraph_gml::GmlBuilder;
use depgraph_style::{
    BuiltInStyleResource, DependencyEdgeAttributeRenderer, DependencyNodeAttributeRenderer,
    StyleConfiguration, StyleResource,
};
use tracing::info;

use crate::options::{Command, GraphOptions, OutputFormat};
use crate::report::DependencyReport;

/// Scope, include and exclude filters combined.
pub fn global_filter(options: &GraphOptions) -> Result<AndArtifactFilter> {
    let mut filter = AndArtifactFilter::new();
    if let Some(scope) = options.scope.as_deref().filter(|s| !s.is_empty()) {
        filter.add(ScopeArtifactFilter::new(scope));
    }
    if !options.includes.is_empty() {
        filter.add(StrictPatternIncludesArtifactFilter::new(&options.includes)?);
    }
    if !options.excludes.is_empty() {
        filter.add(StrictPatternExcludesArtifactFilter::new(&options.excludes)?);
    }
    Ok(filter)
}

/// Target patterns; an empty filter accepts everything.
pub fn target_filter(options: &GraphOptions) -> Result<AndArtifactFilter> {
    let mut filter = AndArtifactFilter::new();
    if !options.target_includes.is_empty() {
        filter.add(StrictPatternIncludesArtifactFilter::new(&options.target_includes)?);
    }
    Ok(filter)
}

pub fn load_style(
    options: &GraphOptions,
    presets: &[BuiltInStyleResource],
) -> Result<StyleConfiguration> {
    let mut additional: Vec<StyleResource> =
        presets.iter().copied().map(StyleResource::BuiltIn).collect();
    if let Some(custom) = &options.custom_style_configuration {
        additional.push(StyleResource::custom(custom)?);
    }

    let style = StyleConfiguration::load(
        &StyleResource::BuiltIn(BuiltInStyleResource::Default),
        &additional,
    )?;
    if options.print_style_configuration {
        info!("effective style configuration:\n{}", style.to_json()?);
    }
    Ok(style)
}

struct BuilderSetup {
    node_names: NodeNames,
    omit_self_references: bool,
    show_group_id: bool,
    show_artifact_id: bool,
    show_version: bool,
    /// `None` installs no edge attribute renderer.
    show_edge_versions: Option<bool>,
}

fn create_builder(
    options: &GraphOptions,
    style: &Rc<StyleConfiguration>,
    setup: BuilderSetup,
) -> Box<dyn GraphBuilder> {
    let config = GraphConfig::new()
        .with_node_names(setup.node_names)
        .with_omit_self_references(setup.omit_self_references);
    let mut builder: Box<dyn GraphBuilder> = match options.output_format {
        OutputFormat::Dot => Box::new(DotBuilder::with_config(config)),
        OutputFormat::Gml => Box::new(GmlBuilder::with_config(config)),
    };

    builder.node_style(style.default_node_attributes());
    builder.edge_style(style.default_edge_attributes());
    builder.use_node_attribute_renderer(Box::new(DependencyNodeAttributeRenderer::new(
        setup.show_group_id,
        setup.show_artifact_id,
        setup.show_version,
        Rc::clone(style),
    )));
    if let Some(show_versions) = setup.show_edge_versions {
        builder.use_edge_attribute_renderer(Box::new(DependencyEdgeAttributeRenderer::new(
            show_versions,
            Rc::clone(style),
        )));
    }
    builder
}

fn node_names(options: &GraphOptions) -> NodeNames {
    if options.merge_scopes {
        NodeNames::VersionlessId
    } else {
        NodeNames::VersionlessIdWithScope
    }
}

/// Resolutions accepted in tree mode: included plus the requested omissions.
pub fn included_resolutions(options: &GraphOptions) -> BTreeSet<NodeResolution> {
    let mut resolutions = BTreeSet::from([NodeResolution::Included]);
    if options.show_duplicates {
        resolutions.insert(NodeResolution::OmittedForDuplicate);
    }
    if options.show_conflicts {
        resolutions.insert(NodeResolution::OmittedForConflict);
    }
    resolutions
}

/// Run a goal against a loaded report and return the graph text.
pub fn create_graph(command: &Command, report: &DependencyReport) -> Result<String> {
    let options = command.options();
    let global = global_filter(options)?;
    let target = target_filter(options)?;

    match command {
        Command::Graph(_) => {
            let style = Rc::new(load_style(options, &[])?);
            let builder = create_builder(
                options,
                &style,
                BuilderSetup {
                    node_names: node_names(options),
                    omit_self_references: false,
                    show_group_id: options.show_group_ids,
                    show_artifact_id: true,
                    show_version: options.show_versions,
                    show_edge_versions: Some(options.show_versions),
                },
            );
            let adapter = if options.show_duplicates || options.show_conflicts {
                GraphBuilderAdapter::for_tree(report, target, included_resolutions(options))
            } else {
                GraphBuilderAdapter::for_graph(report, target)
            };
            info!(project = %report.project.artifact, "creating dependency graph");
            SimpleGraphFactory::new(adapter, global, builder).create_graph(&report.project)
        }
        Command::ByGroupId(_) => {
            let style = Rc::new(load_style(options, &[BuiltInStyleResource::GroupIdOnly])?);
            let builder = create_builder(
                options,
                &style,
                BuilderSetup {
                    node_names: NodeNames::GroupIdWithScope,
                    omit_self_references: true,
                    show_group_id: true,
                    show_artifact_id: false,
                    show_version: false,
                    show_edge_versions: None,
                },
            );
            let adapter =
                GraphBuilderAdapter::for_tree(report, target, NodeResolution::all());
            info!(project = %report.project.artifact, "creating group id graph");
            SimpleGraphFactory::new(adapter, global, builder).create_graph(&report.project)
        }
        Command::Aggregate(_) => {
            let style = Rc::new(load_style(options, &[])?);
            let builder = create_builder(
                options,
                &style,
                BuilderSetup {
                    node_names: node_names(options),
                    omit_self_references: false,
                    show_group_id: options.show_group_ids,
                    show_artifact_id: true,
                    show_version: options.show_versions,
                    show_edge_versions: Some(false),
                },
            );
            let adapter = GraphBuilderAdapter::for_graph(report, target);
            info!(project = %report.project.artifact, "creating aggregated graph");
            AggregatingGraphFactory::new(adapter, global, builder, options.include_parent_projects)
                .create_graph(&report.project)
        }
    }
}
