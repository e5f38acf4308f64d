//! Marker vocabulary for Masquerade.
//!
//! This crate defines the field-level markers consumed by the anonymization
//! engine: which value domain a field belongs to and the bounds used when a
//! replacement value is generated.

pub mod domain;
pub mod markers;

pub use domain::{NumberDomain, StringDomain};
pub use markers::{FileSpec, Marker, MarkerKind, Markers, NumberSpec, Repetition, StringSpec};
