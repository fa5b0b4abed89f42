//! Conversion-rate configuration for prices billed in a custom pricing unit.
//!
//! `ConversionRateConfig` is a lenient union on `conversion_rate_type`:
//! shapes this client does not know are kept as raw JSON and only rejected by
//! `validate()`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::validate::Validate;
use crate::wire::{Model, OpenUnion, RawObject, TaggedUnion, decode_as};

/// Flat conversion rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRateUnitConfig {
    /// Amount of the invoicing currency per pricing unit
    pub unit_amount: String,
}

/// One tier of a tiered conversion rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRateTier {
    pub first_unit: f64,
    /// Exclusive upper bound; open-ended when absent
    #[serde(default)]
    pub last_unit: Option<f64>,
    pub unit_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRateTieredConfig {
    pub tiers: Vec<ConversionRateTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConversionRateConfig {
    pub unit_config: ConversionRateUnitConfig,
}

impl Validate for UnitConversionRateConfig {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

impl Model for UnitConversionRateConfig {
    const NAME: &'static str = "UnitConversionRateConfig";
    const REQUIRED_FIELDS: &'static [&'static str] = &["unit_config"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredConversionRateConfig {
    pub tiered_config: ConversionRateTieredConfig,
}

impl Validate for TieredConversionRateConfig {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

impl Model for TieredConversionRateConfig {
    const NAME: &'static str = "TieredConversionRateConfig";
    const REQUIRED_FIELDS: &'static [&'static str] = &["tiered_config"];
}

/// Typed variants of [`ConversionRateConfig`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "conversion_rate_type", rename_all = "snake_case")]
pub enum ConversionRateVariant {
    Unit(UnitConversionRateConfig),
    Tiered(TieredConversionRateConfig),
}

impl TaggedUnion for ConversionRateVariant {
    const NAME: &'static str = "ConversionRateConfig";
    const DISCRIMINATOR: &'static str = "conversion_rate_type";
    const VARIANTS: &'static [(&'static str, &'static str)] = &[
        ("unit", UnitConversionRateConfig::NAME),
        ("tiered", TieredConversionRateConfig::NAME),
    ];

    fn decode_variant(tag: &str, raw: RawObject) -> Option<ValidationResult<Self>> {
        match tag {
            "unit" => Some(decode_as(raw, Self::Unit)),
            "tiered" => Some(decode_as(raw, Self::Tiered)),
            _ => None,
        }
    }
}

impl Validate for ConversionRateVariant {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Unit(config) => config.validate(),
            Self::Tiered(config) => config.validate(),
        }
    }
}

/// Conversion rate between a custom pricing unit and the invoicing currency.
pub type ConversionRateConfig = OpenUnion<ConversionRateVariant>;

impl ConversionRateConfig {
    /// A flat rate of `unit_amount` per pricing unit.
    pub fn unit(unit_amount: impl Into<String>) -> Self {
        Self::Resolved(ConversionRateVariant::Unit(UnitConversionRateConfig {
            unit_config: ConversionRateUnitConfig {
                unit_amount: unit_amount.into(),
            },
        }))
    }

    /// A rate that varies by tier.
    pub fn tiered(tiers: Vec<ConversionRateTier>) -> Self {
        Self::Resolved(ConversionRateVariant::Tiered(TieredConversionRateConfig {
            tiered_config: ConversionRateTieredConfig { tiers },
        }))
    }

    pub const fn try_pick_unit(&self) -> Option<&UnitConversionRateConfig> {
        match self {
            Self::Resolved(ConversionRateVariant::Unit(config)) => Some(config),
            _ => None,
        }
    }

    pub const fn try_pick_tiered(&self) -> Option<&TieredConversionRateConfig> {
        match self {
            Self::Resolved(ConversionRateVariant::Tiered(config)) => Some(config),
            _ => None,
        }
    }
}
