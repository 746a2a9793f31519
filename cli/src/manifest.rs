//! On-disk record of generated outputs and the declarations they came from.
//!
//! The manifest is how this host uses provenance: an output is stale as
//! soon as its template or any declaration in its provenance set changes
//! fingerprint or disappears.

use anyhow::{Context, Result};
use aptgen_decl::{DeclId, DeclarationGraph, DeclarationQuery, RoundEnvironment};
use aptgen_engine::{FsOutput, RoundReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const MANIFEST_FILE: &str = "aptgen-manifest.json";
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub outputs: BTreeMap<String, ManifestEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            outputs: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub template: DeclId,
    pub template_fingerprint: String,
    /// Provenance set with the fingerprint each declaration had at generation time
    pub sources: BTreeMap<DeclId, String>,
    /// Source names that did not resolve; the output goes stale once one does
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

impl ManifestEntry {
    /// True when `path` names a file inside the output directory: relative
    /// and free of `..` components.
    pub fn is_contained(&self) -> bool {
        self.path.file_name().is_some()
            && self
                .path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputStatus {
    UpToDate,
    Stale { reasons: Vec<String> },
    Orphaned,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputState {
    pub output: String,
    pub template: DeclId,
    #[serde(flatten)]
    pub status: OutputStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    pub outputs: Vec<OutputState>,
    /// Annotated templates with no recorded output
    pub missing: Vec<DeclId>,
}

impl StatusReport {
    pub fn needs_regeneration(&self) -> bool {
        !self.missing.is_empty()
            || self
                .outputs
                .iter()
                .any(|o| o.status != OutputStatus::UpToDate)
    }
}

impl Manifest {
    pub fn path(out_dir: &Path) -> PathBuf {
        out_dir.join(MANIFEST_FILE)
    }

    pub fn load(out_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(out_dir);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
        if manifest.version != MANIFEST_VERSION {
            anyhow::bail!(
                "Unsupported manifest version {} in {}",
                manifest.version,
                path.display()
            );
        }
        Ok(Some(manifest))
    }

    pub fn save(&self, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
        let path = Self::path(out_dir);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }

    /// Record the outputs committed during one round.
    pub fn from_round(
        graph: &DeclarationGraph,
        out_dir: &Path,
        committed: &BTreeMap<String, FsOutput>,
        report: &RoundReport,
    ) -> Self {
        let mut manifest = Manifest::default();

        for unit in &report.generated {
            let Some(output) = committed.get(&unit.qualified_name) else {
                continue;
            };
            let path = output
                .path
                .strip_prefix(out_dir)
                .unwrap_or(&output.path)
                .to_path_buf();
            let sources = output
                .provenance
                .iter()
                .map(|id| (id.clone(), graph.fingerprint(id).unwrap_or_default()))
                .collect();

            manifest.outputs.insert(
                unit.qualified_name.clone(),
                ManifestEntry {
                    path,
                    template: unit.template.clone(),
                    template_fingerprint: graph.fingerprint(&unit.template).unwrap_or_default(),
                    sources,
                    unresolved: unit.unresolved.clone(),
                },
            );
        }

        manifest
    }

    /// Outputs recorded here that `next` no longer produces.
    pub fn superseded_by<'a>(&'a self, next: &Manifest) -> Vec<&'a ManifestEntry> {
        self.outputs
            .iter()
            .filter(|(name, _)| !next.outputs.contains_key(*name))
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Compare recorded fingerprints against the current graph.
    pub fn status(&self, graph: &DeclarationGraph, annotation: &str) -> StatusReport {
        let templates = graph.elements_annotated_with(annotation);
        let mut report = StatusReport::default();

        for (name, entry) in &self.outputs {
            let status = if !templates.contains(&entry.template) {
                OutputStatus::Orphaned
            } else {
                let mut reasons = Vec::new();
                if graph.fingerprint(&entry.template).as_deref()
                    != Some(entry.template_fingerprint.as_str())
                {
                    reasons.push(format!("template {} changed", entry.template));
                }
                for (source, recorded) in &entry.sources {
                    match graph.fingerprint(source) {
                        None => reasons.push(format!("{} was removed", source)),
                        Some(current) if current != *recorded => {
                            reasons.push(format!("{} changed", source))
                        }
                        Some(_) => {}
                    }
                }
                for name in &entry.unresolved {
                    if graph.lookup_declaration(name).is_some() {
                        reasons.push(format!("{} now resolves", name));
                    }
                }
                if reasons.is_empty() {
                    OutputStatus::UpToDate
                } else {
                    OutputStatus::Stale { reasons }
                }
            };

            report.outputs.push(OutputState {
                output: name.clone(),
                template: entry.template.clone(),
                status,
            });
        }

        report.missing = templates
            .into_iter()
            .filter(|t| !self.outputs.values().any(|e| e.template == *t))
            .collect();

        report
    }
}
