//! Schema description shared by every model, and unchecked construction.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::error::ValidationResult;
use crate::validate::Validate;
use crate::wire::raw::RawObject;

/// A schema-described wire object.
pub trait Model: Serialize + DeserializeOwned + Validate {
    /// Schema name used in error messages.
    const NAME: &'static str;
    /// Wire keys that must be present and non-null.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Decode a model from raw wire data, checking required fields first.
    fn from_raw(raw: RawObject) -> ValidationResult<Self> {
        raw.into_model()
    }
}

/// Raw wire data that has not been checked against `T`'s schema.
///
/// Construction never fails. Missing fields and bad shapes surface only
/// when [`Unchecked::validate`] or [`Unchecked::into_checked`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unchecked<T> {
    raw: RawObject,
    #[serde(skip)]
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> Unchecked<T> {
    /// Wrap raw wire data without looking at it.
    pub const fn from_raw_unchecked(raw: RawObject) -> Self {
        Self {
            raw,
            _model: PhantomData,
        }
    }

    /// The underlying raw data.
    pub const fn raw(&self) -> &RawObject {
        &self.raw
    }

    /// Mutable access for patching fields before validation.
    pub fn raw_mut(&mut self) -> &mut RawObject {
        &mut self.raw
    }

    /// Check the raw data against `T` without consuming it.
    pub fn validate(&self) -> ValidationResult<()> {
        self.raw.clone().into_model::<T>().map(drop)
    }

    /// Check the raw data and produce the typed model.
    pub fn into_checked(self) -> ValidationResult<T> {
        self.raw.into_model()
    }
}
