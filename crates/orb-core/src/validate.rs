//! On-demand validation of decoded models.
//!
//! Decoding already guarantees that required fields exist. `Validate` walks
//! whatever decoding had to leave lenient: open enums holding unrecognized
//! strings and lenient unions that never resolved to a typed variant.

use std::collections::BTreeMap;

use crate::error::ValidationResult;

/// Types that can check themselves after decoding.
pub trait Validate {
    /// Validate this value and everything nested in it.
    fn validate(&self) -> ValidationResult<()>;
}

/// Validate a nested field, tagging any failure with its wire key.
pub fn field<T: Validate + ?Sized>(name: &str, value: &T) -> ValidationResult<()> {
    value.validate().map_err(|e| e.in_field(name))
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> ValidationResult<()> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> ValidationResult<()> {
        for (index, item) in self.iter().enumerate() {
            item.validate().map_err(|e| e.in_field(index.to_string()))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> ValidationResult<()> {
        self.as_slice().validate()
    }
}

impl<T: Validate> Validate for BTreeMap<String, T> {
    fn validate(&self) -> ValidationResult<()> {
        for (key, value) in self {
            value.validate().map_err(|e| e.in_field(key.clone()))?;
        }
        Ok(())
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> ValidationResult<()> {
        (**self).validate()
    }
}
