use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading a config and producing the
/// resolved model text. All variants are fatal for the current run; there is
/// no retry or partial-output mode.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration document is not valid TOML.
    #[error("failed to parse config: {0}")]
    ConfigLoad(#[from] toml::de::Error),

    /// A required config field is absent.
    #[error("missing required config field `{0}`")]
    MissingField(String),

    /// A config field has the wrong type or shape.
    #[error("config field `{field}` has the wrong type (expected {expected})")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// A derivation precondition was violated (e.g. negative thrust).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A template token has no matching parameter.
    #[error("undefined placeholder `@{name}` at line {line}, column {column}")]
    UndefinedPlaceholder {
        name: String,
        line: usize,
        column: usize,
    },

    /// Propagated I/O errors (template unreadable, output unwritable).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
