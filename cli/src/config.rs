use anyhow::{Context, Result};
use aptgen_engine::{GeneratorConfig, LookupPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for aptgen.toml.
/// Optional: every setting has a default and can be overridden by flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AptgenConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectConfig>,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "./generated".to_string()
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<String>,
    pub strict: bool,
    pub escape: bool,
}

impl AptgenConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AptgenConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load config, returning None if file doesn't exist
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(project) = &self.project {
            if project.name.trim().is_empty() {
                anyhow::bail!("Project name cannot be empty");
            }
        }
        if self.generator.annotation.trim().is_empty() {
            anyhow::bail!("generator.annotation cannot be empty");
        }
        if self.generator.impl_suffix.is_empty() {
            anyhow::bail!("generator.impl_suffix cannot be empty");
        }
        if self.output.dir.trim().is_empty() {
            anyhow::bail!("output.dir cannot be empty");
        }
        Ok(())
    }

    /// Generator settings with command-line flags applied.
    pub fn generator_config(&self, overrides: &Overrides) -> GeneratorConfig {
        let mut generator = self.generator.clone();
        if overrides.strict {
            generator.lookup = LookupPolicy::Strict;
        }
        if overrides.escape {
            generator.escape_literals = true;
        }
        generator
    }

    /// Output directory; relative paths from the file resolve against the
    /// directory holding the config file.
    pub fn output_dir(&self, config_path: &Path, overrides: &Overrides) -> PathBuf {
        if let Some(path) = &overrides.output {
            return PathBuf::from(path);
        }

        let raw = PathBuf::from(&self.output.dir);
        if raw.is_relative() {
            config_path
                .parent()
                .unwrap_or(Path::new("."))
                .join(raw)
        } else {
            raw
        }
    }
}

/// Load the config at `config_path` if present, defaults otherwise.
pub fn load_or_default(config_path: &str) -> Result<AptgenConfig> {
    Ok(AptgenConfig::load_optional(config_path)?.unwrap_or_default())
}
