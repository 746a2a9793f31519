use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::config::{AptgenConfig, ProjectConfig};
use crate::ui;

pub fn init(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);

    if path.exists() {
        anyhow::bail!(
            "Configuration file already exists: {}\nUse a different path or remove the existing file.",
            path.display()
        );
    }

    let project_name = std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "aptgen-project".to_string());

    let config = AptgenConfig {
        project: Some(ProjectConfig { name: project_name }),
        ..Default::default()
    };

    let config_toml = toml::to_string_pretty(&config)?;
    fs::write(path, &config_toml)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    ui::print_success(&format!("Created {}", path.display()));
    println!();
    println!("{}", "Next steps:".bold());
    println!("  1. Export your declarations as a JSON graph");
    println!("  2. Check what will be generated: {}", "aptgen inspect <graph.json>".cyan());
    println!("  3. Generate: {}", "aptgen generate <graph.json>".cyan());
    Ok(())
}

pub fn validate(config_path: &str) -> Result<()> {
    let config = AptgenConfig::load(config_path)?;

    ui::print_success(&format!("{} is valid", config_path));
    if let Some(project) = &config.project {
        ui::print_info(&format!("project: {}", project.name));
    }
    ui::print_info(&format!("annotation: {}", config.generator.annotation));
    ui::print_info(&format!("lookup: {:?}", config.generator.lookup));
    ui::print_info(&format!("escape literals: {}", config.generator.escape_literals));
    ui::print_info(&format!("output: {}", config.output.dir));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aptgen.toml");
        let path_str = path.to_str().unwrap();

        init(path_str).unwrap();
        let config = AptgenConfig::load(&path).unwrap();
        assert!(config.project.is_some());
        assert_eq!(config.output.dir, "./generated");

        assert!(init(path_str).is_err());
    }
}
