use anyhow::{Context, Result};
use aptgen_decl::parse::load_graph;
use aptgen_decl::{DeclarationGraph, DeclarationQuery, RoundEnvironment};
use aptgen_engine::extractor::extract_member_names;
use aptgen_engine::matcher::match_members;
use aptgen_engine::{GenerateError, GeneratorConfig, LookupPolicy};
use colored::Colorize;
use serde::Serialize;

use crate::config::{load_or_default, Overrides};
use crate::ui;

#[derive(Debug, Serialize)]
struct TemplateView {
    template: String,
    output: String,
    members: Vec<MemberView>,
}

#[derive(Debug, Serialize)]
struct MemberView {
    name: String,
    return_type: String,
    source: String,
    resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    generated: bool,
    names: usize,
}

pub fn inspect(config_path: &str, graph_path: &str, json: bool) -> Result<()> {
    let config = load_or_default(config_path)?;
    let generator = config.generator_config(&Overrides::default());

    let graph = load_graph(graph_path)
        .with_context(|| format!("Failed to load declaration graph: {}", graph_path))?;
    let views = collect(&graph, &generator);

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if views.is_empty() {
        ui::print_warning(&format!(
            "No declarations annotated with @{}",
            generator.annotation
        ));
        return Ok(());
    }

    for view in &views {
        ui::print_step(&format!("{} {} {}", view.template.bold(), ui::symbols::ARROW, view.output));
        if view.members.is_empty() {
            ui::print_info("no eligible members");
        }
        for member in &view.members {
            let detail = match (member.generated, member.resolved) {
                (false, _) => "skipped (has a body)".dimmed().to_string(),
                (true, true) => format!(
                    "{} {} ({} method{})",
                    ui::symbols::FROM,
                    member.source,
                    member.names,
                    if member.names == 1 { "" } else { "s" }
                ),
                (true, false) => {
                    let hint = match &member.suggestion {
                        Some(name) => format!("(unresolved, did you mean {}?)", name),
                        None => "(unresolved)".to_string(),
                    };
                    format!("{} {} {}", ui::symbols::FROM, member.source, hint.yellow())
                }
            };
            println!("    {}() {}", member.name, detail);
        }
    }
    Ok(())
}

fn collect(graph: &DeclarationGraph, config: &GeneratorConfig) -> Vec<TemplateView> {
    graph
        .elements_annotated_with(&config.annotation)
        .into_iter()
        .map(|template| {
            let simple = graph.simple_name(&template).unwrap_or_default();
            let package = graph.package_of(&template).unwrap_or_default();
            let output = aptgen_decl::utils::qualify(package, &config.impl_name(simple));

            let members = match_members(graph, &template)
                .into_iter()
                .map(|member| {
                    // strict lookup so a miss carries the nearest name
                    let (names, suggestion) = match extract_member_names(
                        graph,
                        &template,
                        &member.name,
                        &member.source_name,
                        LookupPolicy::Strict,
                    ) {
                        Ok(extraction) => (Some(extraction.names.len()), None),
                        Err(GenerateError::UnresolvedSource { suggestion, .. }) => (None, suggestion),
                        Err(_) => (None, None),
                    };
                    MemberView {
                        return_type: member.return_type.to_string(),
                        resolved: names.is_some(),
                        suggestion,
                        names: names.unwrap_or(0),
                        generated: member.is_abstract,
                        source: member.source_name,
                        name: member.name,
                    }
                })
                .collect();

            TemplateView {
                template: template.to_string(),
                output,
                members,
            }
        })
        .collect()
}
