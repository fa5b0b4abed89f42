//! Prices, discriminated by `model_type`.
//!
//! Orb keeps adding pricing models, so `Price` is a lenient union: a
//! subscription containing a price of an unknown model still decodes, and
//! the unknown price is kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::models::conversion_rate::ConversionRateConfig;
use crate::models::discount::Discount;
use crate::models::enums::{Cadence, PriceType};
use crate::models::shared::{BillableMetricTiny, BillingCycleConfiguration, ItemSlim, Metadata};
use crate::validate::{self, Validate};
use crate::wire::{ApiEnum, Model, OpenUnion, RawObject, TaggedUnion, decode_as};

/// Fields every price model carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCommon {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub cadence: ApiEnum<Cadence>,
    pub price_type: ApiEnum<PriceType>,
    pub item: ItemSlim,
    #[serde(default)]
    pub billable_metric: Option<BillableMetricTiny>,
    pub billing_cycle_configuration: BillingCycleConfiguration,
    #[serde(default)]
    pub invoicing_cycle_configuration: Option<BillingCycleConfiguration>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub conversion_rate_config: Option<ConversionRateConfig>,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub external_price_id: Option<String>,
    #[serde(default)]
    pub fixed_price_quantity: Option<f64>,
    #[serde(default)]
    pub minimum_amount: Option<String>,
    #[serde(default)]
    pub maximum_amount: Option<String>,
    #[serde(default)]
    pub plan_phase_order: Option<i64>,
    #[serde(default)]
    pub replaces_price_id: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Validate for PriceCommon {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("cadence", &self.cadence)?;
        validate::field("price_type", &self.price_type)?;
        validate::field("item", &self.item)?;
        validate::field("billable_metric", &self.billable_metric)?;
        validate::field("billing_cycle_configuration", &self.billing_cycle_configuration)?;
        validate::field(
            "invoicing_cycle_configuration",
            &self.invoicing_cycle_configuration,
        )?;
        validate::field("conversion_rate_config", &self.conversion_rate_config)?;
        validate::field("discount", &self.discount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    /// Rate per unit of usage
    pub unit_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Amount per package
    pub package_amount: String,
    /// Units per package
    pub package_size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub first_unit: f64,
    #[serde(default)]
    pub last_unit: Option<f64>,
    pub unit_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredConfig {
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkTier {
    /// Upper bound of the tier; the last tier is unbounded
    #[serde(default)]
    pub maximum_units: Option<f64>,
    pub unit_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkConfig {
    pub tiers: Vec<BulkTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixValue {
    /// One value per dimension; `None` matches anything
    pub dimension_values: Vec<Option<String>>,
    pub unit_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub default_unit_amount: String,
    pub dimensions: Vec<Option<String>>,
    pub matrix_values: Vec<MatrixValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    #[serde(flatten)]
    pub common: PriceCommon,
    pub unit_config: UnitConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagePrice {
    #[serde(flatten)]
    pub common: PriceCommon,
    pub package_config: PackageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredPrice {
    #[serde(flatten)]
    pub common: PriceCommon,
    pub tiered_config: TieredConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPrice {
    #[serde(flatten)]
    pub common: PriceCommon,
    pub bulk_config: BulkConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixPrice {
    #[serde(flatten)]
    pub common: PriceCommon,
    pub matrix_config: MatrixConfig,
}

impl Validate for UnitPrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common.validate()
    }
}

impl Validate for PackagePrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common.validate()
    }
}

impl Validate for TieredPrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common.validate()
    }
}

impl Validate for BulkPrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common.validate()
    }
}

impl Validate for MatrixPrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common.validate()?;
        let dimensions = self.matrix_config.dimensions.len();
        for (index, value) in self.matrix_config.matrix_values.iter().enumerate() {
            if value.dimension_values.len() != dimensions {
                return Err(crate::error::ValidationError::Decode {
                    model: Self::NAME,
                    message: format!(
                        "matrix value {index} has {} dimension values, expected {dimensions}",
                        value.dimension_values.len()
                    ),
                }
                .in_field("matrix_config"));
            }
        }
        Ok(())
    }
}

impl Model for UnitPrice {
    const NAME: &'static str = "UnitPrice";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "currency",
        "created_at",
        "cadence",
        "price_type",
        "item",
        "billing_cycle_configuration",
        "unit_config",
    ];
}

impl Model for PackagePrice {
    const NAME: &'static str = "PackagePrice";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "currency",
        "created_at",
        "cadence",
        "price_type",
        "item",
        "billing_cycle_configuration",
        "package_config",
    ];
}

impl Model for TieredPrice {
    const NAME: &'static str = "TieredPrice";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "currency",
        "created_at",
        "cadence",
        "price_type",
        "item",
        "billing_cycle_configuration",
        "tiered_config",
    ];
}

impl Model for BulkPrice {
    const NAME: &'static str = "BulkPrice";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "currency",
        "created_at",
        "cadence",
        "price_type",
        "item",
        "billing_cycle_configuration",
        "bulk_config",
    ];
}

impl Model for MatrixPrice {
    const NAME: &'static str = "MatrixPrice";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "currency",
        "created_at",
        "cadence",
        "price_type",
        "item",
        "billing_cycle_configuration",
        "matrix_config",
    ];
}

/// Typed variants of [`Price`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum PriceModel {
    Unit(UnitPrice),
    Package(PackagePrice),
    Tiered(TieredPrice),
    Bulk(BulkPrice),
    Matrix(MatrixPrice),
}

impl PriceModel {
    /// Fields shared by every model.
    pub const fn common(&self) -> &PriceCommon {
        match self {
            Self::Unit(p) => &p.common,
            Self::Package(p) => &p.common,
            Self::Tiered(p) => &p.common,
            Self::Bulk(p) => &p.common,
            Self::Matrix(p) => &p.common,
        }
    }
}

impl TaggedUnion for PriceModel {
    const NAME: &'static str = "Price";
    const DISCRIMINATOR: &'static str = "model_type";
    const VARIANTS: &'static [(&'static str, &'static str)] = &[
        ("unit", UnitPrice::NAME),
        ("package", PackagePrice::NAME),
        ("tiered", TieredPrice::NAME),
        ("bulk", BulkPrice::NAME),
        ("matrix", MatrixPrice::NAME),
    ];

    fn decode_variant(tag: &str, raw: RawObject) -> Option<ValidationResult<Self>> {
        match tag {
            "unit" => Some(decode_as(raw, Self::Unit)),
            "package" => Some(decode_as(raw, Self::Package)),
            "tiered" => Some(decode_as(raw, Self::Tiered)),
            "bulk" => Some(decode_as(raw, Self::Bulk)),
            "matrix" => Some(decode_as(raw, Self::Matrix)),
            _ => None,
        }
    }
}

impl Validate for PriceModel {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Unit(p) => p.validate(),
            Self::Package(p) => p.validate(),
            Self::Tiered(p) => p.validate(),
            Self::Bulk(p) => p.validate(),
            Self::Matrix(p) => p.validate(),
        }
    }
}

/// A price as returned by the API.
pub type Price = OpenUnion<PriceModel>;

impl Price {
    /// Common fields, when the price model is known.
    pub fn common(&self) -> Option<&PriceCommon> {
        self.resolved().map(PriceModel::common)
    }

    /// The price id, read from the raw data for unknown models.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Resolved(model) => Some(model.common().id.as_str()),
            Self::Unresolved(value) => value.get("id").and_then(serde_json::Value::as_str),
        }
    }

    pub const fn try_pick_unit(&self) -> Option<&UnitPrice> {
        match self {
            Self::Resolved(PriceModel::Unit(p)) => Some(p),
            _ => None,
        }
    }

    pub const fn try_pick_package(&self) -> Option<&PackagePrice> {
        match self {
            Self::Resolved(PriceModel::Package(p)) => Some(p),
            _ => None,
        }
    }

    pub const fn try_pick_tiered(&self) -> Option<&TieredPrice> {
        match self {
            Self::Resolved(PriceModel::Tiered(p)) => Some(p),
            _ => None,
        }
    }

    pub const fn try_pick_bulk(&self) -> Option<&BulkPrice> {
        match self {
            Self::Resolved(PriceModel::Bulk(p)) => Some(p),
            _ => None,
        }
    }

    pub const fn try_pick_matrix(&self) -> Option<&MatrixPrice> {
        match self {
            Self::Resolved(PriceModel::Matrix(p)) => Some(p),
            _ => None,
        }
    }
}
