//! Typed wire model for the Orb subscription-billing API.
//!
//! Every API schema is a plain struct decoded with serde. The pieces that
//! make the model forward compatible live in [`wire`]:
//!
//! - [`ApiEnum`] keeps unknown enum strings instead of failing.
//! - [`OpenUnion`] keeps union payloads it cannot type; strict unions use
//!   [`decode_strict`] and fail with an aggregate [`UnionError`].
//! - [`Unchecked`] wraps raw data whose schema has not been checked yet.
//!
//! Nothing is rejected for being unknown until [`Validate::validate`] runs.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod error;
pub mod models;
mod validate;
pub mod wire;

pub use error::{UnionError, ValidationError, ValidationResult, VariantFailure};
pub use validate::{Validate, field as validate_field};
pub use wire::{
    ApiEnum, Model, OpenUnion, RawObject, TaggedUnion, Unchecked, WireEnum, decode_strict,
};
