//! Forward-compatible enums for string-valued wire fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::validate::Validate;

/// A closed set of known wire strings.
pub trait WireEnum: Sized + Copy {
    /// Enum name used in error messages.
    const NAME: &'static str;

    /// Map a wire string to a known value.
    fn from_wire(value: &str) -> Option<Self>;

    /// The wire string for this value.
    fn as_wire(self) -> &'static str;
}

/// An enum field that tolerates values added to the API after this client.
///
/// Decoding never fails on an unknown string; the string is kept in
/// `Unrecognized`. Encoding an `Unrecognized` value is an error, and so is
/// validating one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiEnum<E> {
    Known(E),
    Unrecognized(String),
}

impl<E: WireEnum> ApiEnum<E> {
    /// The known value, if any.
    pub const fn known(&self) -> Option<E> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// The wire string, whether known or not.
    pub fn raw(&self) -> &str {
        match self {
            Self::Known(value) => value.as_wire(),
            Self::Unrecognized(raw) => raw,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Parse a wire string.
    pub fn parse(value: &str) -> Self {
        E::from_wire(value).map_or_else(|| Self::Unrecognized(value.to_string()), Self::Known)
    }
}

impl<E> From<E> for ApiEnum<E> {
    fn from(value: E) -> Self {
        Self::Known(value)
    }
}

impl<E: WireEnum + PartialEq> PartialEq<E> for ApiEnum<E> {
    fn eq(&self, other: &E) -> bool {
        matches!(self, Self::Known(value) if value == other)
    }
}

impl<E: WireEnum> fmt::Display for ApiEnum<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl<E: WireEnum> Validate for ApiEnum<E> {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Known(_) => Ok(()),
            Self::Unrecognized(raw) => Err(ValidationError::UnrecognizedEnum {
                name: E::NAME,
                value: raw.clone(),
            }),
        }
    }
}

impl<E: WireEnum> Serialize for ApiEnum<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Known(value) => serializer.serialize_str(value.as_wire()),
            Self::Unrecognized(raw) => Err(serde::ser::Error::custom(format!(
                "invalid value {raw:?} for {}",
                E::NAME
            ))),
        }
    }
}

impl<'de, E: WireEnum> Deserialize<'de> for ApiEnum<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
