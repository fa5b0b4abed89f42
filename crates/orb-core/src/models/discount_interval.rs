//! Discounts applied to a subscription over a date range.
//!
//! `DiscountInterval` is a strict union on `discount_type`: a payload that
//! does not fit one of the three known shapes fails to decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationResult;
use crate::models::shared::TransformPriceFilter;
use crate::validate::{self, Validate};
use crate::wire::{Model, RawObject, TaggedUnion, decode_as, deserialize_strict};

/// A fixed currency amount off each matching price interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountDiscountInterval {
    pub amount_discount: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applies_to_price_interval_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<TransformPriceFilter>,
}

impl Validate for AmountDiscountInterval {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for AmountDiscountInterval {
    const NAME: &'static str = "AmountDiscountInterval";
    const REQUIRED_FIELDS: &'static [&'static str] = &["amount_discount", "start_date"];
}

/// A percentage off each matching price interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageDiscountInterval {
    /// Fraction between 0 and 1
    pub percentage_discount: f64,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applies_to_price_interval_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<TransformPriceFilter>,
}

impl Validate for PercentageDiscountInterval {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for PercentageDiscountInterval {
    const NAME: &'static str = "PercentageDiscountInterval";
    const REQUIRED_FIELDS: &'static [&'static str] = &["percentage_discount", "start_date"];
}

/// A number of free usage units on each matching price interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDiscountInterval {
    pub usage_discount: f64,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applies_to_price_interval_ids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<TransformPriceFilter>,
}

impl Validate for UsageDiscountInterval {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for UsageDiscountInterval {
    const NAME: &'static str = "UsageDiscountInterval";
    const REQUIRED_FIELDS: &'static [&'static str] = &["usage_discount", "start_date"];
}

/// A discount active on a subscription between two dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "discount_type", rename_all = "snake_case")]
pub enum DiscountInterval {
    Amount(AmountDiscountInterval),
    Percentage(PercentageDiscountInterval),
    Usage(UsageDiscountInterval),
}

impl DiscountInterval {
    pub const fn start_date(&self) -> DateTime<Utc> {
        match self {
            Self::Amount(d) => d.start_date,
            Self::Percentage(d) => d.start_date,
            Self::Usage(d) => d.start_date,
        }
    }

    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Amount(d) => d.end_date,
            Self::Percentage(d) => d.end_date,
            Self::Usage(d) => d.end_date,
        }
    }

    pub fn applies_to_price_interval_ids(&self) -> &[String] {
        match self {
            Self::Amount(d) => &d.applies_to_price_interval_ids,
            Self::Percentage(d) => &d.applies_to_price_interval_ids,
            Self::Usage(d) => &d.applies_to_price_interval_ids,
        }
    }

    /// Whether the interval covers `at`. The end date is exclusive.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date() <= at && self.end_date().is_none_or(|end| at < end)
    }

    pub const fn try_pick_amount(&self) -> Option<&AmountDiscountInterval> {
        match self {
            Self::Amount(d) => Some(d),
            _ => None,
        }
    }

    pub const fn try_pick_percentage(&self) -> Option<&PercentageDiscountInterval> {
        match self {
            Self::Percentage(d) => Some(d),
            _ => None,
        }
    }

    pub const fn try_pick_usage(&self) -> Option<&UsageDiscountInterval> {
        match self {
            Self::Usage(d) => Some(d),
            _ => None,
        }
    }
}

impl TaggedUnion for DiscountInterval {
    const NAME: &'static str = "DiscountInterval";
    const DISCRIMINATOR: &'static str = "discount_type";
    const VARIANTS: &'static [(&'static str, &'static str)] = &[
        ("amount", AmountDiscountInterval::NAME),
        ("percentage", PercentageDiscountInterval::NAME),
        ("usage", UsageDiscountInterval::NAME),
    ];

    fn decode_variant(tag: &str, raw: RawObject) -> Option<ValidationResult<Self>> {
        match tag {
            "amount" => Some(decode_as(raw, Self::Amount)),
            "percentage" => Some(decode_as(raw, Self::Percentage)),
            "usage" => Some(decode_as(raw, Self::Usage)),
            _ => None,
        }
    }
}

impl Validate for DiscountInterval {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Amount(d) => d.validate(),
            Self::Percentage(d) => d.validate(),
            Self::Usage(d) => d.validate(),
        }
    }
}

impl<'de> Deserialize<'de> for DiscountInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_strict(deserializer)
    }
}
