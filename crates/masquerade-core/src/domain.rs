use serde::{Deserialize, Serialize};

/// Numeric domain of a `NumberSpec` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NumberDomain {
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
}

impl NumberDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberDomain::Byte => "byte",
            NumberDomain::Short => "short",
            NumberDomain::Integer => "integer",
            NumberDomain::Long => "long",
            NumberDomain::Float => "float",
            NumberDomain::Double => "double",
        }
    }

    /// Whether generated values carry a fractional part.
    pub fn is_fractional(&self) -> bool {
        matches!(self, NumberDomain::Float | NumberDomain::Double)
    }

    /// Inclusive range representable by the domain, used to clamp bounds.
    pub fn limits(&self) -> (i64, i64) {
        match self {
            NumberDomain::Byte => (i8::MIN as i64, i8::MAX as i64),
            NumberDomain::Short => (i16::MIN as i64, i16::MAX as i64),
            NumberDomain::Integer => (i32::MIN as i64, i32::MAX as i64),
            NumberDomain::Long | NumberDomain::Float | NumberDomain::Double => (i64::MIN, i64::MAX),
        }
    }
}

/// Semantic category of a generated string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StringDomain {
    /// Random letters within the length bounds.
    String,
    LicensePlate,
    /// Prefix of a fixed lorem source text.
    Text,
    NationalId,
    PhoneInternational,
    PhoneDomestic,
    Url,
    /// Decimal digits within the length bounds.
    Number,
    Email,
    /// One random line of the file at `path`.
    FromFile,
    /// One random element of `possible_values`.
    FromValues,
    /// A string matching `pattern`.
    Regex,
    Ipv4,
    Ipv6,
}

impl StringDomain {
    pub const ALL: [StringDomain; 14] = [
        StringDomain::String,
        StringDomain::LicensePlate,
        StringDomain::Text,
        StringDomain::NationalId,
        StringDomain::PhoneInternational,
        StringDomain::PhoneDomestic,
        StringDomain::Url,
        StringDomain::Number,
        StringDomain::Email,
        StringDomain::FromFile,
        StringDomain::FromValues,
        StringDomain::Regex,
        StringDomain::Ipv4,
        StringDomain::Ipv6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StringDomain::String => "string",
            StringDomain::LicensePlate => "license_plate",
            StringDomain::Text => "text",
            StringDomain::NationalId => "national_id",
            StringDomain::PhoneInternational => "phone_international",
            StringDomain::PhoneDomestic => "phone_domestic",
            StringDomain::Url => "url",
            StringDomain::Number => "number",
            StringDomain::Email => "email",
            StringDomain::FromFile => "from_file",
            StringDomain::FromValues => "from_values",
            StringDomain::Regex => "regex",
            StringDomain::Ipv4 => "ipv4",
            StringDomain::Ipv6 => "ipv6",
        }
    }

    /// Whether the domain honours `min_length`/`max_length`.
    pub fn uses_length(&self) -> bool {
        matches!(
            self,
            StringDomain::String | StringDomain::Text | StringDomain::Number
        )
    }
}

impl std::fmt::Display for StringDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
