use anyhow::{Context, Result};
use aptgen_decl::parse::load_graph;
use aptgen_engine::{CollectingMessager, FsFiler, Processor, RoundReport};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_or_default, Overrides};
use crate::manifest::Manifest;
use crate::ui;

#[derive(Serialize)]
struct GenerateOutput<'a> {
    output_dir: &'a Path,
    report: &'a RoundReport,
    diagnostics: &'a [aptgen_engine::Diagnostic],
    removed: Vec<PathBuf>,
}

pub fn generate(config_path: &str, graph_path: &str, overrides: Overrides, json: bool) -> Result<()> {
    let config = load_or_default(config_path)?;
    let generator = config.generator_config(&overrides);
    let out_dir = config.output_dir(Path::new(config_path), &overrides);

    if !json {
        ui::print_step(&format!("Loading declarations from {}", graph_path));
    }
    let graph = load_graph(graph_path)
        .with_context(|| format!("Failed to load declaration graph: {}", graph_path))?;
    if !json {
        ui::print_info(&format!(
            "{} declarations",
            graph.document_declarations().count()
        ));
    }

    let previous = Manifest::load(&out_dir)?.unwrap_or_default();

    let mut filer = FsFiler::new(&out_dir);
    let mut messager = CollectingMessager::new();
    let mut processor = Processor::new(generator);
    let report = processor.process(&graph, &mut filer, &mut messager);

    let manifest = Manifest::from_round(&graph, &out_dir, filer.outputs(), &report);
    let mut removed = Vec::new();
    for entry in previous.superseded_by(&manifest) {
        if !entry.is_contained() {
            tracing::warn!(path = %entry.path.display(), "manifest entry points outside the output directory");
            if !json {
                ui::print_warning(&format!(
                    "Not removing {}: outside the output directory",
                    entry.path.display()
                ));
            }
            continue;
        }
        let path = out_dir.join(&entry.path);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "removed superseded output");
            removed.push(path);
        }
    }
    manifest.save(&out_dir)?;

    if json {
        let output = GenerateOutput {
            output_dir: &out_dir,
            report: &report,
            diagnostics: &messager.diagnostics,
            removed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report, &messager, &out_dir, &removed);
    }

    if !report.is_success() {
        anyhow::bail!("{} template(s) failed to generate", report.failures.len());
    }
    Ok(())
}

fn print_report(report: &RoundReport, messager: &CollectingMessager, out_dir: &Path, removed: &[PathBuf]) {
    if report.generated.is_empty() && report.failures.is_empty() {
        ui::print_warning("No annotated templates found.");
        return;
    }

    if !messager.diagnostics.is_empty() {
        ui::print_section("Diagnostics");
        ui::print_diagnostics(&messager.diagnostics);
        println!();
    }

    for unit in &report.generated {
        ui::print_success(&format!(
            "{} ({} source{})",
            unit.qualified_name.bold(),
            unit.provenance.len(),
            if unit.provenance.len() == 1 { "" } else { "s" }
        ));
    }
    for failure in &report.failures {
        ui::print_error(&format!("{}: {}", failure.template, failure.message));
    }
    for path in removed {
        ui::print_info(&format!("removed {}", path.display()));
    }

    println!();
    println!("  Output: {}", out_dir.display().to_string().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{ "packages": [{ "name": "app", "declarations": [
        { "name": "App", "kind": "interface", "annotations": ["aptgen.annotation.Sample"],
          "members": [{ "name": "Thing1", "returnType": { "declared": "java.util.List", "args": ["java.lang.String"] } }] },
        { "name": "Thing1", "members": [{ "name": "x" }] }
    ] }] }"#;

    const EMPTY_GRAPH: &str = r#"{ "packages": [{ "name": "app", "declarations": [
        { "name": "Thing1", "members": [{ "name": "x" }] }
    ] }] }"#;

    #[test]
    fn test_generate_writes_outputs_and_removes_superseded() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("aptgen.toml");
        let graph = dir.path().join("graph.json");
        fs::write(&graph, GRAPH).unwrap();

        generate(
            config.to_str().unwrap(),
            graph.to_str().unwrap(),
            Overrides::default(),
            true,
        )
        .unwrap();

        let out_dir = dir.path().join("generated");
        let output = out_dir.join("app/App_Impl.java");
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("public final class App_Impl implements App {"));
        let manifest = Manifest::load(&out_dir).unwrap().unwrap();
        assert!(manifest.outputs.contains_key("app.App_Impl"));

        fs::write(&graph, EMPTY_GRAPH).unwrap();
        generate(
            config.to_str().unwrap(),
            graph.to_str().unwrap(),
            Overrides::default(),
            true,
        )
        .unwrap();

        assert!(!output.exists());
        assert!(Manifest::load(&out_dir).unwrap().unwrap().outputs.is_empty());
    }

    #[test]
    fn test_generate_keeps_files_outside_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("aptgen.toml");
        let graph = dir.path().join("graph.json");
        fs::write(&graph, EMPTY_GRAPH).unwrap();

        let outside = dir.path().join("keep.txt");
        fs::write(&outside, "precious").unwrap();

        let out_dir = dir.path().join("generated");
        let mut tampered = Manifest::default();
        tampered.outputs.insert(
            "app.App_Impl".to_string(),
            crate::manifest::ManifestEntry {
                path: PathBuf::from("../keep.txt"),
                template: aptgen_decl::DeclId::new("app.App"),
                template_fingerprint: String::new(),
                sources: Default::default(),
                unresolved: Vec::new(),
            },
        );
        tampered.save(&out_dir).unwrap();

        generate(
            config.to_str().unwrap(),
            graph.to_str().unwrap(),
            Overrides::default(),
            true,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&outside).unwrap(), "precious");
        assert!(Manifest::load(&out_dir).unwrap().unwrap().outputs.is_empty());
    }

    #[test]
    fn test_generate_strict_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        fs::write(
            &graph,
            r#"{ "packages": [{ "name": "app", "declarations": [
                { "name": "App", "kind": "interface", "annotations": ["aptgen.annotation.Sample"],
                  "members": [{ "name": "Missing", "returnType": { "declared": "java.util.List", "args": ["java.lang.String"] } }] }
            ] }] }"#,
        )
        .unwrap();

        let result = generate(
            dir.path().join("aptgen.toml").to_str().unwrap(),
            graph.to_str().unwrap(),
            Overrides {
                strict: true,
                ..Default::default()
            },
            true,
        );
        assert!(result.is_err());
        assert!(!dir.path().join("generated/app/App_Impl.java").exists());
    }
}
