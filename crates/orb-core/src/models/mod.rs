//! Schema types for Orb API resources.

mod conversion_rate;
mod discount;
mod discount_interval;
mod enums;
mod new_price;
mod price;
mod shared;
mod subscription;

pub use conversion_rate::{
    ConversionRateConfig, ConversionRateTier, ConversionRateTieredConfig,
    ConversionRateUnitConfig, ConversionRateVariant, TieredConversionRateConfig,
    UnitConversionRateConfig,
};
pub use discount::{AmountDiscount, Discount, PercentageDiscount, TrialDiscount, UsageDiscount};
pub use discount_interval::{
    AmountDiscountInterval, DiscountInterval, PercentageDiscountInterval, UsageDiscountInterval,
};
pub use enums::{
    BillingCycleAlignment, Cadence, CancelOption, ChangeOption, DurationUnit, FilterField,
    FilterOperator, PriceType, SubscriptionStatus,
};
pub use new_price::{NewPrice, NewPriceCommon};
pub use price::{
    BulkConfig, BulkPrice, BulkTier, MatrixConfig, MatrixPrice, MatrixValue, PackageConfig,
    PackagePrice, Price, PriceCommon, PriceModel, Tier, TieredConfig, TieredPrice, UnitConfig,
    UnitPrice,
};
pub use shared::{
    BillableMetricTiny, BillingCycleConfiguration, CustomerSlim, ItemSlim, Metadata, Page,
    PaginationMetadata, PlanSlim, TransformPriceFilter,
};
pub use subscription::{FixedFeeQuantityTransition, PriceInterval, Subscription};
