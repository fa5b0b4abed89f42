//! Discriminated unions over JSON objects.
//!
//! A union field holds one of several object shapes, selected by a string
//! discriminator inside the object. Two decoding strategies exist:
//!
//! - [`OpenUnion`] keeps data it cannot type as a raw value and reports the
//!   problem only from [`Validate::validate`]. Re-encoding an unresolved value
//!   reproduces the input exactly.
//! - [`decode_strict`] fails immediately with a [`UnionError`] that lists
//!   every variant it attempted.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{UnionError, ValidationError, ValidationResult, VariantFailure};
use crate::validate::Validate;
use crate::wire::model::Model;
use crate::wire::raw::RawObject;

/// A set of object shapes selected by a discriminator property.
pub trait TaggedUnion: Sized + Serialize + Validate {
    /// Union name used in error messages.
    const NAME: &'static str;
    /// Wire key of the discriminator property.
    const DISCRIMINATOR: &'static str;
    /// Known discriminator values and the type name of each variant.
    const VARIANTS: &'static [(&'static str, &'static str)];

    /// Decode the variant selected by `tag`.
    ///
    /// Returns `None` when `tag` is not a known discriminator value.
    fn decode_variant(tag: &str, raw: RawObject) -> Option<ValidationResult<Self>>;

    /// The variant type name for a discriminator value.
    fn variant_name(tag: &str) -> Option<&'static str> {
        Self::VARIANTS
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, name)| *name)
    }
}

/// Decode one variant through its schema: presence check, decode, validate.
pub fn decode_as<T: Model, U>(raw: RawObject, wrap: fn(T) -> U) -> ValidationResult<U> {
    raw.into_model::<T>().map(wrap)
}

/// Read the discriminator of a union object, if it is a string.
fn read_tag<'a, U: TaggedUnion>(raw: &'a RawObject) -> Option<&'a str> {
    raw.get(U::DISCRIMINATOR).and_then(Value::as_str)
}

/// Decode a strict union, failing on anything it cannot type.
pub fn decode_strict<U: TaggedUnion>(value: Value) -> Result<U, UnionError> {
    let Value::Object(map) = value else {
        return Err(UnionError::NotAnObject { union: U::NAME });
    };
    let raw = RawObject::from(map);

    let Some(tag) = read_tag::<U>(&raw).map(str::to_owned) else {
        return Err(UnionError::NoVariant {
            union: U::NAME,
            discriminator: U::DISCRIMINATOR,
            tag: None,
        });
    };

    match U::decode_variant(&tag, raw) {
        Some(Ok(variant)) => Ok(variant),
        Some(Err(reason)) => Err(UnionError::VariantFailed {
            union: U::NAME,
            attempts: vec![VariantFailure {
                variant: U::variant_name(&tag).unwrap_or(U::NAME),
                reason,
            }],
        }),
        None => Err(UnionError::NoVariant {
            union: U::NAME,
            discriminator: U::DISCRIMINATOR,
            tag: Some(tag),
        }),
    }
}

/// `Deserialize` body for strict unions.
pub fn deserialize_strict<'de, U, D>(deserializer: D) -> Result<U, D::Error>
where
    U: TaggedUnion,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decode_strict(value).map_err(D::Error::custom)
}

/// A lenient union: either a typed variant or the raw data it came from.
#[derive(Debug, Clone)]
pub enum OpenUnion<U> {
    /// The discriminator matched and the payload fit the variant.
    Resolved(U),
    /// Nothing matched; the original value is kept verbatim.
    Unresolved(Value),
}

impl<U: TaggedUnion> OpenUnion<U> {
    /// Decode without ever failing.
    pub fn decode(value: Value) -> Self {
        let Value::Object(map) = &value else {
            tracing::debug!(union = U::NAME, "union value is not an object, keeping raw");
            return Self::Unresolved(value);
        };

        let Some(tag) = map.get(U::DISCRIMINATOR).and_then(Value::as_str) else {
            tracing::debug!(
                union = U::NAME,
                discriminator = U::DISCRIMINATOR,
                "union discriminator missing, keeping raw"
            );
            return Self::Unresolved(value);
        };

        match U::decode_variant(tag, RawObject::from(map.clone())) {
            Some(Ok(variant)) => Self::Resolved(variant),
            Some(Err(reason)) => {
                tracing::debug!(union = U::NAME, tag, %reason, "union variant rejected, keeping raw");
                Self::Unresolved(value)
            }
            None => {
                tracing::debug!(union = U::NAME, tag, "unknown union variant, keeping raw");
                Self::Unresolved(value)
            }
        }
    }

    /// The typed variant, if one was resolved.
    pub const fn resolved(&self) -> Option<&U> {
        match self {
            Self::Resolved(variant) => Some(variant),
            Self::Unresolved(_) => None,
        }
    }

    /// Consume the wrapper, yielding the typed variant if one was resolved.
    pub fn into_resolved(self) -> Option<U> {
        match self {
            Self::Resolved(variant) => Some(variant),
            Self::Unresolved(_) => None,
        }
    }

    /// The raw value kept for an unresolved union.
    pub const fn raw(&self) -> Option<&Value> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved(value) => Some(value),
        }
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The discriminator value, read from the variant or the raw data.
    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Resolved(variant) => serde_json::to_value(variant)
                .ok()
                .and_then(|v| v.get(U::DISCRIMINATOR)?.as_str().map(str::to_owned)),
            Self::Unresolved(value) => value
                .get(U::DISCRIMINATOR)
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

impl<U> From<U> for OpenUnion<U> {
    fn from(variant: U) -> Self {
        Self::Resolved(variant)
    }
}

impl<U: TaggedUnion> Validate for OpenUnion<U> {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Resolved(variant) => variant.validate(),
            Self::Unresolved(_) => Err(ValidationError::UnresolvedUnion { union: U::NAME }),
        }
    }
}

impl<U: TaggedUnion> Serialize for OpenUnion<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Resolved(variant) => variant.serialize(serializer),
            Self::Unresolved(value) => value.serialize(serializer),
        }
    }
}

impl<'de, U: TaggedUnion> Deserialize<'de> for OpenUnion<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::decode)
    }
}

/// Structural equality.
///
/// Two resolved values compare their typed variants. Otherwise the sides are
/// equal when they encode to the same JSON; a resolved value that cannot be
/// encoded never equals an unresolved one.
impl<U: TaggedUnion + PartialEq> PartialEq for OpenUnion<U> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            (Self::Unresolved(a), Self::Unresolved(b)) => a == b,
            _ => match (serde_json::to_value(self), serde_json::to_value(other)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
        }
    }
}
