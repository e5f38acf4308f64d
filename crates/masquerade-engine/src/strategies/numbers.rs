use masquerade_core::NumberSpec;
use rand::RngCore;

use crate::errors::{AnonymizeError, Result};
use crate::primitives::{random_float, random_int};
use crate::value::GeneratedValue;

/// Draws a value in `[min, max)` typed after the marker's numeric domain.
pub fn generate_number(spec: &NumberSpec, rng: &mut dyn RngCore) -> Result<GeneratedValue> {
    if spec.min > spec.max {
        return Err(AnonymizeError::Configuration(format!(
            "{} marker min must be <= max",
            spec.domain.as_str()
        )));
    }

    if spec.domain.is_fractional() {
        let value = random_float(rng, spec.min as f64, spec.max as f64);
        return Ok(GeneratedValue::Float(value));
    }

    let (lower, upper) = spec.domain.limits();
    if spec.min < lower || spec.max > upper {
        return Err(AnonymizeError::Configuration(format!(
            "{} marker bounds [{}, {}] exceed the domain range [{lower}, {upper}]",
            spec.domain.as_str(),
            spec.min,
            spec.max
        )));
    }
    Ok(GeneratedValue::Int(random_int(rng, spec.min, spec.max)))
}
