//! Diagnostic sink the generator reports through.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    MandatoryWarning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::MandatoryWarning => "mandatory warning",
            Severity::Note => "note",
        };
        f.write_str(label)
    }
}

/// Fire-and-forget diagnostics channel provided by the host.
pub trait Messager {
    fn report(&mut self, severity: Severity, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Keeps every diagnostic in memory, in the order reported, and mirrors
/// each one to `tracing` at debug level.
#[derive(Debug, Default, Clone)]
pub struct CollectingMessager {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingMessager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

impl Messager for CollectingMessager {
    fn report(&mut self, severity: Severity, message: &str) {
        tracing::debug!(target: "aptgen::diagnostic", %severity, "{}", message);
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}
