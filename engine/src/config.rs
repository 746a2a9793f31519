use crate::diagnostics::Severity;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANNOTATION: &str = "aptgen.annotation.Sample";
pub const DEFAULT_IMPL_SUFFIX: &str = "_Impl";

/// What to do when a template member names a declaration that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Generate an empty list for the member.
    #[default]
    Lenient,
    /// Fail the template with an unresolved-source error.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fully-qualified name of the trigger annotation
    pub annotation: String,
    pub impl_suffix: String,
    pub lookup: LookupPolicy,
    /// Escape quotes, backslashes and control characters in generated literals.
    /// Off by default: names are emitted verbatim.
    pub escape_literals: bool,
    pub provenance_severity: Severity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            annotation: DEFAULT_ANNOTATION.to_string(),
            impl_suffix: DEFAULT_IMPL_SUFFIX.to_string(),
            lookup: LookupPolicy::default(),
            escape_literals: false,
            provenance_severity: Severity::MandatoryWarning,
        }
    }
}

impl GeneratorConfig {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            ..Default::default()
        }
    }

    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_escape_literals(mut self, enabled: bool) -> Self {
        self.escape_literals = enabled;
        self
    }

    pub fn with_impl_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.impl_suffix = suffix.into();
        self
    }

    pub fn with_provenance_severity(mut self, severity: Severity) -> Self {
        self.provenance_severity = severity;
        self
    }

    pub fn impl_name(&self, template_simple_name: &str) -> String {
        format!("{}{}", template_simple_name, self.impl_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_verbatim_lenient_behavior() {
        let config = GeneratorConfig::default();
        assert_eq!(config.annotation, DEFAULT_ANNOTATION);
        assert_eq!(config.lookup, LookupPolicy::Lenient);
        assert!(!config.escape_literals);
        assert_eq!(config.impl_name("App"), "App_Impl");
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "lookup": "strict", "escape_literals": true }"#).unwrap();
        assert_eq!(config.lookup, LookupPolicy::Strict);
        assert!(config.escape_literals);
        assert_eq!(config.impl_suffix, DEFAULT_IMPL_SUFFIX);
        assert_eq!(config.provenance_severity, Severity::MandatoryWarning);
    }
}
