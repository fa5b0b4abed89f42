//! Error types for decoding and validating Orb wire data.
//!
//! `ValidationError` covers everything that can be wrong with a single
//! payload once it has been read off the wire. `UnionError` is the aggregate
//! failure raised by strict tagged unions when no variant can represent the
//! data.

use thiserror::Error;

/// Result type alias for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while checking wire data against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or `null`.
    #[error("{model}: missing required field `{field}`")]
    MissingField {
        /// Schema name of the model being checked
        model: &'static str,
        /// Wire key of the missing field
        field: String,
    },

    /// A value could not be decoded into the declared type.
    #[error("{model}: {message}")]
    Decode {
        /// Schema name of the model (or field) being decoded
        model: &'static str,
        /// Decoder message
        message: String,
    },

    /// An open enum holds a wire string it does not know.
    #[error("invalid value {value:?} for {name}")]
    UnrecognizedEnum {
        /// Enum name
        name: &'static str,
        /// The raw wire string
        value: String,
    },

    /// A lenient union never resolved to a typed variant.
    #[error("data did not match any variant of {union}")]
    UnresolvedUnion {
        /// Union name
        union: &'static str,
    },

    /// A nested field failed validation.
    #[error("invalid field `{field}`: {source}")]
    Field {
        /// Wire key of the nested field
        field: String,
        /// What was wrong inside it
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wrap this error with the name of the field it was found under.
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Dotted path from the outermost field to the innermost failure.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field { field, source } = current {
            path.push(field.as_str());
            current = source;
        }
        if let Self::MissingField { field, .. } = current {
            path.push(field.as_str());
        }
        path
    }

    /// The innermost error, with all field wrappers removed.
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Field { source, .. } = current {
            current = source;
        }
        current
    }
}

/// One variant that was tried and rejected during strict union decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFailure {
    /// Type name of the attempted variant
    pub variant: &'static str,
    /// Why it was rejected
    pub reason: ValidationError,
}

/// Aggregate failure of a strict tagged union.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnionError {
    /// The discriminator was missing, not a string, or not a known tag.
    #[error("no valid union variant for {union}: discriminator `{discriminator}` {}", describe_tag(.tag.as_deref()))]
    NoVariant {
        /// Union name
        union: &'static str,
        /// Wire key of the discriminator
        discriminator: &'static str,
        /// The discriminator value, if it was a string
        tag: Option<String>,
    },

    /// The discriminator was recognized but every attempted variant failed.
    #[error("no valid union variant for {union}: {}", describe_attempts(.attempts))]
    VariantFailed {
        /// Union name
        union: &'static str,
        /// Every attempted variant with its failure
        attempts: Vec<VariantFailure>,
    },

    /// The value was not a JSON object.
    #[error("{union} must be a JSON object")]
    NotAnObject {
        /// Union name
        union: &'static str,
    },
}

fn describe_tag(tag: Option<&str>) -> String {
    tag.map_or_else(
        || "is missing or not a string".to_string(),
        |t| format!("has unknown value {t:?}"),
    )
}

fn describe_attempts(attempts: &[VariantFailure]) -> String {
    attempts
        .iter()
        .map(|a| format!("attempted {} ({})", a.variant, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
