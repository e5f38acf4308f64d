use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{NumberDomain, StringDomain};

/// Bounds for the number of values appended to a container field.
///
/// Scalar fields ignore these bounds and always receive one value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repetition {
    pub min: u32,
    pub max: u32,
}

impl Default for Repetition {
    fn default() -> Self {
        Self { min: 1, max: 1 }
    }
}

/// Marker for numeric fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberSpec {
    pub domain: NumberDomain,
    #[serde(default = "default_min_value")]
    pub min: i64,
    #[serde(default = "default_max_value")]
    pub max: i64,
    #[serde(default)]
    pub repetition: Repetition,
}

fn default_min_value() -> i64 {
    0
}

fn default_max_value() -> i64 {
    100
}

impl NumberSpec {
    pub fn new(domain: NumberDomain) -> Self {
        Self {
            domain,
            min: default_min_value(),
            max: default_max_value(),
            repetition: Repetition::default(),
        }
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn repeat(mut self, min: u32, max: u32) -> Self {
        self.repetition = Repetition { min, max };
        self
    }
}

/// Marker for string fields.
///
/// `min_length`/`max_length` are `None` when not specified, which is distinct
/// from an explicit zero length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StringSpec {
    pub domain: StringDomain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub repetition: Repetition,
}

impl StringSpec {
    pub fn new(domain: StringDomain) -> Self {
        Self {
            domain,
            min_length: None,
            max_length: None,
            path: None,
            possible_values: Vec::new(),
            pattern: None,
            repetition: Repetition::default(),
        }
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.possible_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn repeat(mut self, min: u32, max: u32) -> Self {
        self.repetition = Repetition { min, max };
        self
    }
}

/// Marker for fields holding the path of a file that must be replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileSpec {
    /// Directory where the replacement file is materialized.
    pub directory: PathBuf,
    /// Strategy for the replacement file name (extension excluded).
    pub name: StringSpec,
    /// Delete the file referenced by the current value first.
    #[serde(default)]
    pub remove_previous: bool,
    #[serde(default)]
    pub repetition: Repetition,
}

impl FileSpec {
    pub fn new(directory: impl Into<PathBuf>, name: StringSpec) -> Self {
        Self {
            directory: directory.into(),
            name,
            remove_previous: false,
            repetition: Repetition::default(),
        }
    }

    pub fn remove_previous(mut self, remove: bool) -> Self {
        self.remove_previous = remove;
        self
    }

    pub fn repeat(mut self, min: u32, max: u32) -> Self {
        self.repetition = Repetition { min, max };
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKind {
    Number,
    String,
    File,
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Number => "number",
            MarkerKind::String => "string",
            MarkerKind::File => "file",
        }
    }
}

/// Marker selected for a field.
#[derive(Debug, Clone, Copy)]
pub enum Marker<'a> {
    Number(&'a NumberSpec),
    String(&'a StringSpec),
    File(&'a FileSpec),
}

impl Marker<'_> {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::Number(_) => MarkerKind::Number,
            Marker::String(_) => MarkerKind::String,
            Marker::File(_) => MarkerKind::File,
        }
    }

    pub fn repetition(&self) -> Repetition {
        match self {
            Marker::Number(spec) => spec.repetition,
            Marker::String(spec) => spec.repetition,
            Marker::File(spec) => spec.repetition,
        }
    }
}

/// Markers attached to one field.
///
/// A field may carry several markers; only the first one in the order
/// number, string, file is acted upon.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Markers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<StringSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSpec>,
}

impl Markers {
    pub fn with_number(mut self, spec: NumberSpec) -> Self {
        self.number = Some(spec);
        self
    }

    pub fn with_string(mut self, spec: StringSpec) -> Self {
        self.string = Some(spec);
        self
    }

    pub fn with_file(mut self, spec: FileSpec) -> Self {
        self.file = Some(spec);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.string.is_none() && self.file.is_none()
    }

    /// Kinds present on the field, in selection order.
    pub fn kinds(&self) -> Vec<MarkerKind> {
        let mut kinds = Vec::new();
        if self.number.is_some() {
            kinds.push(MarkerKind::Number);
        }
        if self.string.is_some() {
            kinds.push(MarkerKind::String);
        }
        if self.file.is_some() {
            kinds.push(MarkerKind::File);
        }
        kinds
    }

    pub fn select(&self) -> Option<Marker<'_>> {
        if let Some(spec) = &self.number {
            return Some(Marker::Number(spec));
        }
        if let Some(spec) = &self.string {
            return Some(Marker::String(spec));
        }
        self.file.as_ref().map(Marker::File)
    }
}

impl From<NumberSpec> for Markers {
    fn from(spec: NumberSpec) -> Self {
        Markers::default().with_number(spec)
    }
}

impl From<StringSpec> for Markers {
    fn from(spec: StringSpec) -> Self {
        Markers::default().with_string(spec)
    }
}

impl From<FileSpec> for Markers {
    fn from(spec: FileSpec) -> Self {
        Markers::default().with_file(spec)
    }
}
