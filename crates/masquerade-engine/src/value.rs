use std::path::PathBuf;

/// Value produced by a marker strategy before it is converted to the field type.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl GeneratedValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeneratedValue::Int(value) => Some(*value as f64),
            GeneratedValue::Float(value) => Some(*value),
            GeneratedValue::Text(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GeneratedValue::Int(_) => "integer",
            GeneratedValue::Float(_) => "float",
            GeneratedValue::Text(_) => "text",
        }
    }
}

/// Field types that can receive generated values.
pub trait FieldValue: Sized + 'static {
    const TYPE_NAME: &'static str;

    /// Converts a generated value, or `None` when it does not fit the type.
    fn from_generated(value: GeneratedValue) -> Option<Self>;

    /// Textual view used by file markers to read the current path.
    fn as_text(&self) -> Option<&str> {
        None
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_generated(value: GeneratedValue) -> Option<Self> {
                    value.as_i64().and_then(|value| <$ty>::try_from(value).ok())
                }
            }
        )*
    };
}

integer_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_generated(value: GeneratedValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FieldValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_generated(value: GeneratedValue) -> Option<Self> {
        value.as_f64().map(|value| value as f32)
    }
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_generated(value: GeneratedValue) -> Option<Self> {
        match value {
            GeneratedValue::Text(value) => Some(value),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldValue for PathBuf {
    const TYPE_NAME: &'static str = "PathBuf";

    fn from_generated(value: GeneratedValue) -> Option<Self> {
        match value {
            GeneratedValue::Text(value) => Some(PathBuf::from(value)),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        self.to_str()
    }
}
