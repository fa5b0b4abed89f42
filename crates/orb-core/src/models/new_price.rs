//! Request-side price definitions, used when creating prices.

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::models::conversion_rate::ConversionRateConfig;
use crate::models::enums::Cadence;
use crate::models::price::{BulkConfig, MatrixConfig, PackageConfig, TieredConfig, UnitConfig};
use crate::models::shared::{BillingCycleConfiguration, Metadata};
use crate::validate::{self, Validate};
use crate::wire::ApiEnum;

/// Fields shared by every new price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPriceCommon {
    pub name: String,
    pub item_id: String,
    pub cadence: ApiEnum<Cadence>,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_metric_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billed_in_advance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle_configuration: Option<BillingCycleConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate_config: Option<ConversionRateConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_price_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_price_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_grouping_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl NewPriceCommon {
    pub fn new(
        name: impl Into<String>,
        item_id: impl Into<String>,
        cadence: Cadence,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            item_id: item_id.into(),
            cadence: cadence.into(),
            currency: currency.into(),
            billable_metric_id: None,
            billed_in_advance: None,
            billing_cycle_configuration: None,
            conversion_rate: None,
            conversion_rate_config: None,
            external_price_id: None,
            fixed_price_quantity: None,
            invoice_grouping_key: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_billable_metric(mut self, billable_metric_id: impl Into<String>) -> Self {
        self.billable_metric_id = Some(billable_metric_id.into());
        self
    }

    #[must_use]
    pub fn with_external_price_id(mut self, external_price_id: impl Into<String>) -> Self {
        self.external_price_id = Some(external_price_id.into());
        self
    }

    #[must_use]
    pub fn with_conversion_rate_config(mut self, config: ConversionRateConfig) -> Self {
        self.conversion_rate_config = Some(config);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl Validate for NewPriceCommon {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("cadence", &self.cadence)?;
        validate::field("billing_cycle_configuration", &self.billing_cycle_configuration)?;
        validate::field("conversion_rate_config", &self.conversion_rate_config)
    }
}

/// A price to create, tagged by `model_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum NewPrice {
    Unit {
        #[serde(flatten)]
        common: NewPriceCommon,
        unit_config: UnitConfig,
    },
    Package {
        #[serde(flatten)]
        common: NewPriceCommon,
        package_config: PackageConfig,
    },
    Tiered {
        #[serde(flatten)]
        common: NewPriceCommon,
        tiered_config: TieredConfig,
    },
    Bulk {
        #[serde(flatten)]
        common: NewPriceCommon,
        bulk_config: BulkConfig,
    },
    Matrix {
        #[serde(flatten)]
        common: NewPriceCommon,
        matrix_config: MatrixConfig,
    },
}

impl NewPrice {
    /// A per-unit price.
    pub fn unit(common: NewPriceCommon, unit_amount: impl Into<String>) -> Self {
        Self::Unit {
            common,
            unit_config: UnitConfig {
                unit_amount: unit_amount.into(),
            },
        }
    }

    pub const fn common(&self) -> &NewPriceCommon {
        match self {
            Self::Unit { common, .. }
            | Self::Package { common, .. }
            | Self::Tiered { common, .. }
            | Self::Bulk { common, .. }
            | Self::Matrix { common, .. } => common,
        }
    }

    /// Wire value of `model_type`.
    pub const fn model_type(&self) -> &'static str {
        match self {
            Self::Unit { .. } => "unit",
            Self::Package { .. } => "package",
            Self::Tiered { .. } => "tiered",
            Self::Bulk { .. } => "bulk",
            Self::Matrix { .. } => "matrix",
        }
    }
}

impl Validate for NewPrice {
    fn validate(&self) -> ValidationResult<()> {
        self.common().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_new_price_encodes_flat() {
        let price = NewPrice::unit(
            NewPriceCommon::new("API calls", "item_1", Cadence::Monthly, "USD")
                .with_billable_metric("bm_1"),
            "0.01",
        );
        assert_eq!(
            serde_json::to_value(&price).unwrap(),
            json!({
                "model_type": "unit",
                "name": "API calls",
                "item_id": "item_1",
                "cadence": "monthly",
                "currency": "USD",
                "billable_metric_id": "bm_1",
                "unit_config": {"unit_amount": "0.01"}
            })
        );
        assert_eq!(price.model_type(), "unit");
    }

    #[test]
    fn test_package_new_price_roundtrip() {
        let price = NewPrice::Package {
            common: NewPriceCommon::new("Seats", "item_2", Cadence::Annual, "EUR")
                .with_external_price_id("seats-annual"),
            package_config: PackageConfig {
                package_amount: "100.00".to_string(),
                package_size: 10,
            },
        };
        let json = serde_json::to_value(&price).unwrap();
        let back: NewPrice = serde_json::from_value(json).unwrap();
        assert_eq!(back, price);
        assert_eq!(back.common().external_price_id.as_deref(), Some("seats-annual"));
    }

    #[test]
    fn test_unrecognized_cadence_cannot_be_sent() {
        let mut common = NewPriceCommon::new("X", "item_3", Cadence::Monthly, "USD");
        common.cadence = ApiEnum::Unrecognized("hourly".to_string());
        let price = NewPrice::unit(common, "1");
        assert!(price.validate().is_err());
        assert!(serde_json::to_value(&price).is_err());
    }
}
