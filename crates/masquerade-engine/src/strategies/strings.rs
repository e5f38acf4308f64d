use std::path::Path;

use masquerade_core::{StringDomain, StringSpec};
use rand::{Rng, RngCore};
use rand_regex::Regex as RandRegex;

use crate::errors::{AnonymizeError, Result};
use crate::primitives::lines::LineSource;
use crate::primitives::{
    LOREM_IPSUM, padded_number, pick, random_digits, random_int, random_len, random_letters,
};

const DOMESTIC_PREFIXES: &[&str] = &["06", "07"];
const URL_SCHEMES: &[&str] = &["https://", "http://"];

/// Lengths substituted when a marker leaves its length bounds unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthDefaults {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthDefaults {
    fn default() -> Self {
        Self { min: 5, max: 15 }
    }
}

/// Inputs shared by every string domain; each domain reads only what it needs.
#[derive(Debug, Clone, Copy)]
pub struct StringParams<'a> {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub path: Option<&'a Path>,
    pub possible_values: &'a [String],
    pub regex: Option<&'a RandRegex>,
}

impl<'a> StringParams<'a> {
    pub fn from_spec(spec: &'a StringSpec, regex: Option<&'a RandRegex>) -> Self {
        Self {
            min_length: spec.min_length,
            max_length: spec.max_length,
            path: spec.path.as_deref(),
            possible_values: &spec.possible_values,
            regex,
        }
    }
}

/// Compiles the pattern of a `regex` marker; other domains get `None`.
pub fn compile_pattern(spec: &StringSpec, max_repeat: u32) -> Result<Option<RandRegex>> {
    if spec.domain != StringDomain::Regex {
        return Ok(None);
    }
    let pattern = spec.pattern.as_deref().ok_or_else(|| {
        AnonymizeError::Configuration("regex domain requires a pattern".to_string())
    })?;
    let regex = RandRegex::compile(pattern, max_repeat).map_err(|err| {
        AnonymizeError::Configuration(format!("invalid regex pattern '{pattern}': {err}"))
    })?;
    Ok(Some(regex))
}

/// The string domain strategy set.
#[derive(Debug, Clone, Copy)]
pub struct StringStrategies<'a> {
    defaults: LengthDefaults,
    lines: &'a LineSource,
}

impl<'a> StringStrategies<'a> {
    pub fn new(defaults: LengthDefaults, lines: &'a LineSource) -> Self {
        Self { defaults, lines }
    }

    pub fn generate(
        &self,
        domain: StringDomain,
        params: &StringParams<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        match domain {
            StringDomain::String => self.generic(params, rng),
            StringDomain::LicensePlate => Ok(license_plate(rng)),
            StringDomain::Text => self.text(params, rng),
            StringDomain::NationalId => Ok(national_id(rng)),
            StringDomain::PhoneInternational => Ok(phone_international(rng)),
            StringDomain::PhoneDomestic => Ok(phone_domestic(rng)),
            StringDomain::Url => Ok(url(rng)),
            StringDomain::Number => self.number(params, rng),
            StringDomain::Email => Ok(self.email(rng)),
            StringDomain::FromFile => self.from_file(params, rng),
            StringDomain::FromValues => from_values(params, rng),
            StringDomain::Regex => from_regex(params, rng),
            StringDomain::Ipv4 => Ok(ipv4(rng)),
            StringDomain::Ipv6 => Ok(ipv6(rng)),
        }
    }

    fn length_bounds(&self, params: &StringParams<'_>) -> Result<(usize, usize)> {
        let min = params.min_length.unwrap_or(self.defaults.min);
        let max = params.max_length.unwrap_or(self.defaults.max);
        if min > max {
            return Err(AnonymizeError::Configuration(format!(
                "min_length {min} must be <= max_length {max}"
            )));
        }
        Ok((min, max))
    }

    fn generic(&self, params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
        let (min, max) = self.length_bounds(params)?;
        Ok(random_letters(rng, min, max))
    }

    fn text(&self, params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
        let (min, max) = self.length_bounds(params)?;
        let len = random_len(rng, min, max).min(LOREM_IPSUM.len());
        Ok(LOREM_IPSUM[..len].to_string())
    }

    fn number(&self, params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
        let (min, max) = self.length_bounds(params)?;
        let len = random_len(rng, min, max);
        Ok(random_digits(rng, len))
    }

    fn email(&self, rng: &mut dyn RngCore) -> String {
        let min = self.defaults.min.max(1);
        let max = self.defaults.max.max(min);
        format!(
            "{}.{}@{}.{}",
            random_letters(rng, min, max),
            random_letters(rng, min, max),
            random_letters(rng, 3, 7),
            random_letters(rng, 2, 3)
        )
    }

    fn from_file(&self, params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
        let path = params
            .path
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| {
                AnonymizeError::Configuration(
                    "from_file domain requires a non-empty path".to_string(),
                )
            })?;
        self.lines.random_line(path, rng)
    }
}

fn license_plate(rng: &mut dyn RngCore) -> String {
    format!(
        "{}-{}-{}",
        random_letters(rng, 2, 2).to_uppercase(),
        padded_number(rng, 0, 999, 3),
        random_letters(rng, 2, 2).to_uppercase()
    )
}

fn national_id(rng: &mut dyn RngCore) -> String {
    format!(
        "{}{}{}{}{}{}",
        padded_number(rng, 1, 2, 1),
        random_digits(rng, 2),
        padded_number(rng, 1, 12, 2),
        padded_number(rng, 1, 99, 2),
        random_digits(rng, 3),
        random_digits(rng, 3)
    )
}

fn phone_international(rng: &mut dyn RngCore) -> String {
    format!("0{}", random_digits(rng, 12))
}

fn phone_domestic(rng: &mut dyn RngCore) -> String {
    let prefix = pick(rng, DOMESTIC_PREFIXES).copied().unwrap_or("06");
    format!("{prefix}{}", random_digits(rng, 8))
}

fn url(rng: &mut dyn RngCore) -> String {
    let scheme = pick(rng, URL_SCHEMES).copied().unwrap_or("https://");
    format!(
        "{scheme}{}/{}/{}",
        random_letters(rng, 5, 10),
        random_letters(rng, 5, 10),
        random_letters(rng, 5, 10)
    )
}

fn from_values(params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
    pick(rng, params.possible_values).cloned().ok_or_else(|| {
        AnonymizeError::Configuration(
            "from_values domain requires at least one possible value".to_string(),
        )
    })
}

fn from_regex(params: &StringParams<'_>, rng: &mut dyn RngCore) -> Result<String> {
    let regex = params.regex.ok_or_else(|| {
        AnonymizeError::Configuration("regex domain requires a compiled pattern".to_string())
    })?;
    Ok(rng.sample::<String, _>(regex))
}

fn ipv4(rng: &mut dyn RngCore) -> String {
    let octets: Vec<String> = (0..4)
        .map(|_| random_int(rng, 0, 256).to_string())
        .collect();
    octets.join(".")
}

fn ipv6(rng: &mut dyn RngCore) -> String {
    let groups: Vec<String> = (0..8)
        .map(|_| format!("{:x}", random_int(rng, 0, 65536)))
        .collect();
    groups.join(":")
}
