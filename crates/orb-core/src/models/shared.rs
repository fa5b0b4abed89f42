//! Small schema types shared by prices, discounts and subscriptions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationResult;
use crate::models::enums::{DurationUnit, FilterField, FilterOperator};
use crate::validate::{self, Validate};
use crate::wire::{ApiEnum, Model};

/// User-defined string metadata attached to most resources.
pub type Metadata = BTreeMap<String, String>;

/// The item a price bills for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSlim {
    pub id: String,
    pub name: String,
}

impl Validate for ItemSlim {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

impl Model for ItemSlim {
    const NAME: &'static str = "ItemSlim";
    const REQUIRED_FIELDS: &'static [&'static str] = &["id", "name"];
}

/// Reference to the billable metric that meters a usage price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableMetricTiny {
    pub id: String,
}

impl Validate for BillableMetricTiny {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

/// Length of a billing or invoicing cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleConfiguration {
    pub duration: i64,
    pub duration_unit: ApiEnum<DurationUnit>,
}

impl Validate for BillingCycleConfiguration {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("duration_unit", &self.duration_unit)
    }
}

/// Restricts an adjustment or discount to matching prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformPriceFilter {
    pub field: ApiEnum<FilterField>,
    pub operator: ApiEnum<FilterOperator>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl TransformPriceFilter {
    pub fn new(field: FilterField, operator: FilterOperator, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            values,
        }
    }
}

impl Validate for TransformPriceFilter {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("field", &self.field)?;
        validate::field("operator", &self.operator)
    }
}

/// Customer reference embedded in a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSlim {
    pub id: String,
    #[serde(default)]
    pub external_customer_id: Option<String>,
}

impl Validate for CustomerSlim {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

impl Model for CustomerSlim {
    const NAME: &'static str = "CustomerSlim";
    const REQUIRED_FIELDS: &'static [&'static str] = &["id"];
}

/// Plan reference embedded in a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSlim {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_plan_id: Option<String>,
}

impl Validate for PlanSlim {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

/// Cursor state returned with every list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination_metadata: PaginationMetadata,
}

impl<T> Page<T> {
    /// Cursor for the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.pagination_metadata.has_more {
            self.pagination_metadata.next_cursor.as_deref()
        } else {
            None
        }
    }
}

impl<T: Validate> Validate for Page<T> {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("data", &self.data)
    }
}
