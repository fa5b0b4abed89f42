//! Discounts attached directly to a price.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationResult;
use crate::models::shared::TransformPriceFilter;
use crate::validate::{self, Validate};
use crate::wire::{Model, RawObject, TaggedUnion, decode_as, deserialize_strict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageDiscount {
    pub percentage_discount: f64,
    #[serde(default)]
    pub applies_to_price_ids: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Option<Vec<TransformPriceFilter>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Validate for PercentageDiscount {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for PercentageDiscount {
    const NAME: &'static str = "PercentageDiscount";
    const REQUIRED_FIELDS: &'static [&'static str] = &["percentage_discount"];
}

/// Free trial, optionally capped by an amount or a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialDiscount {
    #[serde(default)]
    pub trial_amount_discount: Option<String>,
    #[serde(default)]
    pub trial_percentage_discount: Option<f64>,
    #[serde(default)]
    pub applies_to_price_ids: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Option<Vec<TransformPriceFilter>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Validate for TrialDiscount {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for TrialDiscount {
    const NAME: &'static str = "TrialDiscount";
    const REQUIRED_FIELDS: &'static [&'static str] = &[];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDiscount {
    pub usage_discount: f64,
    #[serde(default)]
    pub applies_to_price_ids: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Option<Vec<TransformPriceFilter>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Validate for UsageDiscount {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for UsageDiscount {
    const NAME: &'static str = "UsageDiscount";
    const REQUIRED_FIELDS: &'static [&'static str] = &["usage_discount"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountDiscount {
    pub amount_discount: String,
    #[serde(default)]
    pub applies_to_price_ids: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Option<Vec<TransformPriceFilter>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Validate for AmountDiscount {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("filters", &self.filters)
    }
}

impl Model for AmountDiscount {
    const NAME: &'static str = "AmountDiscount";
    const REQUIRED_FIELDS: &'static [&'static str] = &["amount_discount"];
}

/// A discount on a single price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "discount_type", rename_all = "snake_case")]
pub enum Discount {
    Percentage(PercentageDiscount),
    Trial(TrialDiscount),
    Usage(UsageDiscount),
    Amount(AmountDiscount),
}

impl Discount {
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Percentage(d) => d.reason.as_deref(),
            Self::Trial(d) => d.reason.as_deref(),
            Self::Usage(d) => d.reason.as_deref(),
            Self::Amount(d) => d.reason.as_deref(),
        }
    }

    pub const fn try_pick_percentage(&self) -> Option<&PercentageDiscount> {
        match self {
            Self::Percentage(d) => Some(d),
            _ => None,
        }
    }

    pub const fn try_pick_trial(&self) -> Option<&TrialDiscount> {
        match self {
            Self::Trial(d) => Some(d),
            _ => None,
        }
    }

    pub const fn try_pick_usage(&self) -> Option<&UsageDiscount> {
        match self {
            Self::Usage(d) => Some(d),
            _ => None,
        }
    }

    pub const fn try_pick_amount(&self) -> Option<&AmountDiscount> {
        match self {
            Self::Amount(d) => Some(d),
            _ => None,
        }
    }
}

impl TaggedUnion for Discount {
    const NAME: &'static str = "Discount";
    const DISCRIMINATOR: &'static str = "discount_type";
    const VARIANTS: &'static [(&'static str, &'static str)] = &[
        ("percentage", PercentageDiscount::NAME),
        ("trial", TrialDiscount::NAME),
        ("usage", UsageDiscount::NAME),
        ("amount", AmountDiscount::NAME),
    ];

    fn decode_variant(tag: &str, raw: RawObject) -> Option<ValidationResult<Self>> {
        match tag {
            "percentage" => Some(decode_as(raw, Self::Percentage)),
            "trial" => Some(decode_as(raw, Self::Trial)),
            "usage" => Some(decode_as(raw, Self::Usage)),
            "amount" => Some(decode_as(raw, Self::Amount)),
            _ => None,
        }
    }
}

impl Validate for Discount {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Percentage(d) => d.validate(),
            Self::Trial(d) => d.validate(),
            Self::Usage(d) => d.validate(),
            Self::Amount(d) => d.validate(),
        }
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_strict(deserializer)
    }
}
