//! Anonymization engine for Masquerade.
//!
//! Types register a `Schema` describing their marked fields; an
//! `Anonymizer` then replaces those fields in place with synthetic values
//! (numbers, domain-shaped strings, freshly written files) and runs the
//! type's completion hooks.

pub mod engine;
pub mod errors;
pub mod logging;
pub mod options;
pub mod primitives;
pub mod registry;
pub mod report;
pub mod strategies;
pub mod value;

pub use engine::Anonymizer;
pub use errors::{AnonymizeError, HookError, Result};
pub use logging::{LogConfig, LogFormat, init_logging};
pub use options::{AnonymizeOptions, RemovalPolicy};
pub use primitives::files::{FileStore, LocalFileStore};
pub use registry::{Anonymizable, Registry, Schema, SchemaBuilder};
pub use report::AnonymizationReport;
pub use value::{FieldValue, GeneratedValue};

pub use masquerade_core::{
    FileSpec, Marker, MarkerKind, Markers, NumberDomain, NumberSpec, Repetition, StringDomain,
    StringSpec,
};
