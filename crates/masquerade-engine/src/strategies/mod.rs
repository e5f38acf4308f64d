//! Value strategies selected by field markers.

pub mod numbers;
pub mod strings;

pub use numbers::generate_number;
pub use strings::{LengthDefaults, StringParams, StringStrategies, compile_pattern};
