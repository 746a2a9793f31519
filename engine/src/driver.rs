//! Round controller: discovers templates and runs the generation pipeline
//! once per template.

use crate::config::GeneratorConfig;
use crate::diagnostics::{Messager, Severity};
use crate::error::{GenerateError, Result};
use crate::extractor::extract_member_names;
use crate::filer::Filer;
use crate::matcher::match_members;
use crate::provenance::{report_provenance, Provenance};
use crate::synth::{ImplPlan, ImplSynthesizer, MethodPlan, SynthOptions};
use aptgen_decl::utils::qualify;
use aptgen_decl::{DeclId, DeclarationQuery, RoundEnvironment};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVersion {
    Latest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    Idle,
    Processing,
}

/// A fully rendered output, not yet handed to a filer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub template: DeclId,
    pub qualified_name: String,
    pub text: String,
    pub provenance: Provenance,
    /// Source names that did not resolve and generated an empty list.
    /// Not part of the provenance; a host watches for them to appear.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateFailure {
    pub template: DeclId,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundReport {
    pub generated: Vec<GeneratedUnit>,
    pub failures: Vec<TemplateFailure>,
    /// Whether the annotation was claimed; always false so other processors
    /// still see it.
    pub claimed: bool,
}

impl RoundReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build the output for one template without touching any sink.
pub fn generate_unit<Q: DeclarationQuery + ?Sized>(
    query: &Q,
    template: &DeclId,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit> {
    let template_name = query
        .simple_name(template)
        .ok_or_else(|| GenerateError::UnknownTemplate(template.clone()))?
        .to_string();
    let package = query.package_of(template).unwrap_or_default().to_string();
    let impl_name = config.impl_name(&template_name);

    let mut provenance = Provenance::new();
    let mut unresolved = Vec::new();
    let mut methods = Vec::new();

    for member in match_members(query, template) {
        if !member.is_abstract {
            tracing::debug!(template = %template, member = %member.name, "skipping non-abstract member");
            continue;
        }

        let extraction = extract_member_names(
            query,
            template,
            &member.name,
            &member.source_name,
            config.lookup,
        )?;
        match extraction.source {
            Some(source) => {
                provenance.insert(source);
            }
            None if !unresolved.contains(&member.source_name) => {
                unresolved.push(member.source_name.clone());
            }
            None => {}
        }

        methods.push(MethodPlan {
            member,
            names: extraction.names,
        });
    }

    let plan = ImplPlan {
        qualified_name: qualify(&package, &impl_name),
        package,
        template_name,
        impl_name,
        methods,
    };
    let synth = ImplSynthesizer::new(SynthOptions {
        escape_literals: config.escape_literals,
    });

    Ok(GeneratedUnit {
        template: template.clone(),
        text: synth.render(&plan),
        qualified_name: plan.qualified_name,
        provenance,
        unresolved,
    })
}

/// Hand a rendered unit to the filer, committing only after the whole text
/// was written.
pub fn emit_unit(filer: &mut dyn Filer, unit: &GeneratedUnit) -> Result<()> {
    let io_err = |source| GenerateError::Io {
        unit: unit.qualified_name.clone(),
        source,
    };

    let mut writer = filer
        .create_source(&unit.qualified_name, &unit.provenance)
        .map_err(io_err)?;
    writer.write_all(unit.text.as_bytes()).map_err(io_err)?;
    writer.finish().map_err(io_err)
}

pub struct Processor {
    config: GeneratorConfig,
    state: ProcessorState,
}

impl Processor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            state: ProcessorState::Idle,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn supported_annotation_types(&self) -> Vec<String> {
        vec![self.config.annotation.clone()]
    }

    pub fn supported_source_version(&self) -> SourceVersion {
        SourceVersion::Latest
    }

    /// Run one round over every declaration carrying the trigger annotation.
    ///
    /// A failing template is reported at error severity and recorded in the
    /// report; the remaining templates are still processed.
    pub fn process<E>(
        &mut self,
        env: &E,
        filer: &mut dyn Filer,
        messager: &mut dyn Messager,
    ) -> RoundReport
    where
        E: DeclarationQuery + RoundEnvironment + ?Sized,
    {
        let templates = env.elements_annotated_with(&self.config.annotation);
        let mut report = RoundReport::default();
        if templates.is_empty() {
            tracing::debug!(annotation = %self.config.annotation, "no annotated declarations this round");
            return report;
        }

        self.state = ProcessorState::Processing;
        tracing::info!(templates = templates.len(), "processing round");

        for template in &templates {
            match self.handle(env, template, filer, messager) {
                Ok(unit) => {
                    tracing::info!(
                        output = %unit.qualified_name,
                        provenance = unit.provenance.len(),
                        "generated implementation"
                    );
                    report.generated.push(unit);
                }
                Err(e) => {
                    messager.report(Severity::Error, &e.to_string());
                    report.failures.push(TemplateFailure {
                        template: template.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        self.state = ProcessorState::Idle;
        report
    }

    fn handle<Q: DeclarationQuery + ?Sized>(
        &self,
        query: &Q,
        template: &DeclId,
        filer: &mut dyn Filer,
        messager: &mut dyn Messager,
    ) -> Result<GeneratedUnit> {
        let _span = tracing::debug_span!("template", template = %template).entered();

        let unit = generate_unit(query, template, &self.config)?;
        report_provenance(
            query,
            &unit.provenance,
            self.config.provenance_severity,
            messager,
        );
        emit_unit(filer, &unit)?;
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingMessager;
    use crate::filer::MemoryFiler;
    use aptgen_decl::prelude::list_of_string;
    use aptgen_decl::{DeclKind, Declaration, DeclarationGraph, GraphDocument, Member, PackageDecl};

    const ANNOTATION: &str = "aptgen.annotation.Sample";

    fn graph(decls: Vec<Declaration>) -> DeclarationGraph {
        DeclarationGraph::new(GraphDocument {
            packages: vec![PackageDecl {
                name: "app".to_string(),
                declarations: decls,
            }],
        })
        .unwrap()
    }

    #[test]
    fn test_processor_contract() {
        let processor = Processor::new(GeneratorConfig::default());
        assert_eq!(processor.supported_annotation_types(), vec![ANNOTATION.to_string()]);
        assert_eq!(processor.supported_source_version(), SourceVersion::Latest);
        assert_eq!(processor.state(), ProcessorState::Idle);
    }

    #[test]
    fn test_round_without_templates_is_empty() {
        let graph = graph(vec![Declaration::new("Thing1", DeclKind::Class)]);
        let mut processor = Processor::new(GeneratorConfig::default());
        let mut filer = MemoryFiler::new();
        let mut messager = CollectingMessager::new();

        let report = processor.process(&graph, &mut filer, &mut messager);
        assert!(report.generated.is_empty());
        assert!(!report.claimed);
        assert!(filer.outputs().is_empty());
        assert_eq!(processor.state(), ProcessorState::Idle);
    }

    #[test]
    fn test_generate_unit_names_output() {
        let graph = graph(vec![Declaration::new("App", DeclKind::Interface)
            .with_annotation(ANNOTATION)
            .with_member(Member::method("Thing1", list_of_string()))]);
        let unit =
            generate_unit(&graph, &DeclId::new("app.App"), &GeneratorConfig::default()).unwrap();
        assert_eq!(unit.qualified_name, "app.App_Impl");
        assert!(unit.provenance.is_empty());
        assert_eq!(unit.unresolved, vec!["app.Thing1".to_string()]);
        assert!(unit.text.contains("public java.util.List<java.lang.String> Thing1()"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let graph = graph(vec![]);
        let err = generate_unit(&graph, &DeclId::new("app.Ghost"), &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnknownTemplate(_)));
    }
}
