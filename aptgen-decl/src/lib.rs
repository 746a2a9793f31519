//! Declaration graph model for aptgen
//!
//! This crate provides the read-only view of a host's declarations that the
//! generator works against: the JSON graph format, an in-memory index that
//! answers the query facade, and helpers for name suggestions and
//! fingerprints used by incremental hosts.

pub mod error;
pub mod graph;
pub mod parse;
pub mod prelude;
pub mod query;
pub mod search;
pub mod types;
pub mod utils;

pub use error::*;
pub use graph::DeclarationGraph;
pub use query::*;
pub use search::*;
pub use types::*;
