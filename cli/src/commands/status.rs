use anyhow::{Context, Result};
use aptgen_decl::parse::load_graph;
use colored::Colorize;
use std::path::Path;

use crate::config::{load_or_default, Overrides};
use crate::manifest::{Manifest, OutputStatus, StatusReport};
use crate::ui;

pub fn status(config_path: &str, graph_path: &str, overrides: Overrides, json: bool) -> Result<()> {
    let config = load_or_default(config_path)?;
    let generator = config.generator_config(&overrides);
    let out_dir = config.output_dir(Path::new(config_path), &overrides);

    let graph = load_graph(graph_path)
        .with_context(|| format!("Failed to load declaration graph: {}", graph_path))?;
    let manifest = Manifest::load(&out_dir)?.unwrap_or_default();
    let report = manifest.status(&graph, &generator.annotation);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_status(&report, &out_dir);
    }
    Ok(())
}

fn print_status(report: &StatusReport, out_dir: &Path) {
    ui::print_step(&format!("Outputs in {}", out_dir.display()));

    if report.outputs.is_empty() && report.missing.is_empty() {
        ui::print_info("nothing generated and no annotated templates");
        return;
    }

    for state in &report.outputs {
        match &state.status {
            OutputStatus::UpToDate => {
                println!("  {} {}", "up to date".green(), state.output);
            }
            OutputStatus::Stale { reasons } => {
                println!("  {} {}", "stale".yellow().bold(), state.output);
                for reason in reasons {
                    ui::print_info(&format!("{} {}", ui::symbols::BULLET, reason));
                }
            }
            OutputStatus::Orphaned => {
                println!(
                    "  {} {} (template {} is gone)",
                    "orphaned".red(),
                    state.output,
                    state.template
                );
            }
        }
    }

    for template in &report.missing {
        println!("  {} {}", "not generated".yellow(), template);
    }

    println!();
    if report.needs_regeneration() {
        ui::print_warning(&format!("Run {} to regenerate", "aptgen generate".cyan()));
    } else {
        ui::print_success("Everything is up to date");
    }
}
