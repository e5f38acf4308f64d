use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by failing completion hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors emitted while anonymizing objects.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// Marker parameters are missing or inconsistent with the field.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The accessor for a field is not registered.
    #[error("no accessor `{accessor}` registered for field '{field}' of {type_name}")]
    MethodResolution {
        type_name: &'static str,
        field: &'static str,
        accessor: String,
    },
    /// The accessor exists but may not be called.
    #[error("accessor `{accessor}` of {type_name} is restricted: {reason}")]
    Access {
        type_name: &'static str,
        accessor: String,
        reason: &'static str,
    },
    #[error("field '{field}' of {type_name} is a {container} which cannot be appended to")]
    UnsupportedContainer {
        type_name: &'static str,
        field: &'static str,
        container: &'static str,
    },
    #[error("completion hook '{hook}' of {type_name} failed: {source}")]
    HookInvocation {
        type_name: &'static str,
        hook: &'static str,
        #[source]
        source: HookError,
    },
    /// Precondition failure: absent object or unregistered type.
    #[error("cannot anonymize: {0}")]
    Anonymization(String),
    #[error("file error at {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Options(String),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, AnonymizeError>;
