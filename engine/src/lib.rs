//! # aptgen-engine
//!
//! Generates implementation classes for annotated template interfaces.
//!
//! Each zero-argument template method returning `List<String>` is matched by
//! name to a declaration in the same package; the generated method returns
//! the names of that declaration's methods. Every output carries the set of
//! declarations it was derived from so a host can regenerate it when any of
//! them change.
//!
//! - **Matcher** - selects eligible template members
//! - **Extractor** - reads member names from source declarations
//! - **Synthesizer** - renders the implementation class
//! - **Provenance** - records which declarations fed each output
//! - **Driver** - runs the pipeline for every template in a round
//!
//! ## Example
//!
//! ```rust,ignore
//! use aptgen_engine::{CollectingMessager, GeneratorConfig, MemoryFiler, Processor};
//!
//! let mut processor = Processor::new(GeneratorConfig::default());
//! let report = processor.process(&graph, &mut MemoryFiler::new(), &mut CollectingMessager::new());
//! ```

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod filer;
pub mod matcher;
pub mod provenance;
pub mod synth;

pub use config::{GeneratorConfig, LookupPolicy};
pub use diagnostics::{CollectingMessager, Diagnostic, Messager, Severity};
pub use driver::{
    emit_unit, generate_unit, GeneratedUnit, Processor, ProcessorState, RoundReport,
    SourceVersion, TemplateFailure,
};
pub use error::GenerateError;
pub use filer::{Filer, FsFiler, FsOutput, MemoryFiler, MemoryOutput, SourceWriter};
pub use provenance::Provenance;
