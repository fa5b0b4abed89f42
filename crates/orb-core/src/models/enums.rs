//! String enums used across the Orb schema.

use crate::wire::WireEnum;

/// Billing cadence of a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    OneTime,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Custom,
}

impl WireEnum for Cadence {
    const NAME: &'static str = "Cadence";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "one_time" => Some(Self::OneTime),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semi_annual" => Some(Self::SemiAnnual),
            "annual" => Some(Self::Annual),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi_annual",
            Self::Annual => "annual",
            Self::Custom => "custom",
        }
    }
}

/// Whether a price charges for usage or a fixed fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceType {
    UsagePrice,
    FixedPrice,
}

impl WireEnum for PriceType {
    const NAME: &'static str = "PriceType";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "usage_price" => Some(Self::UsagePrice),
            "fixed_price" => Some(Self::FixedPrice),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::UsagePrice => "usage_price",
            Self::FixedPrice => "fixed_price",
        }
    }
}

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Active,
    Ended,
    Upcoming,
}

impl WireEnum for SubscriptionStatus {
    const NAME: &'static str = "SubscriptionStatus";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "ended" => Some(Self::Ended),
            "upcoming" => Some(Self::Upcoming),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Unit of a billing cycle duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Day,
    Month,
}

impl WireEnum for DurationUnit {
    const NAME: &'static str = "DurationUnit";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }
}

/// Property a price filter matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    PriceId,
    ItemId,
    PriceType,
    Currency,
    PricingUnitId,
}

impl WireEnum for FilterField {
    const NAME: &'static str = "FilterField";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "price_id" => Some(Self::PriceId),
            "item_id" => Some(Self::ItemId),
            "price_type" => Some(Self::PriceType),
            "currency" => Some(Self::Currency),
            "pricing_unit_id" => Some(Self::PricingUnitId),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::PriceId => "price_id",
            Self::ItemId => "item_id",
            Self::PriceType => "price_type",
            Self::Currency => "currency",
            Self::PricingUnitId => "pricing_unit_id",
        }
    }
}

/// How a price filter compares its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Includes,
    Excludes,
}

impl WireEnum for FilterOperator {
    const NAME: &'static str = "FilterOperator";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "includes" => Some(Self::Includes),
            "excludes" => Some(Self::Excludes),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::Excludes => "excludes",
        }
    }
}

/// When a scheduled plan change takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOption {
    RequestedDate,
    EndOfSubscriptionTerm,
    Immediate,
}

impl WireEnum for ChangeOption {
    const NAME: &'static str = "ChangeOption";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "requested_date" => Some(Self::RequestedDate),
            "end_of_subscription_term" => Some(Self::EndOfSubscriptionTerm),
            "immediate" => Some(Self::Immediate),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::RequestedDate => "requested_date",
            Self::EndOfSubscriptionTerm => "end_of_subscription_term",
            Self::Immediate => "immediate",
        }
    }
}

/// When a cancellation takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelOption {
    EndOfSubscriptionTerm,
    Immediate,
    RequestedDate,
}

impl WireEnum for CancelOption {
    const NAME: &'static str = "CancelOption";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "end_of_subscription_term" => Some(Self::EndOfSubscriptionTerm),
            "immediate" => Some(Self::Immediate),
            "requested_date" => Some(Self::RequestedDate),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::EndOfSubscriptionTerm => "end_of_subscription_term",
            Self::Immediate => "immediate",
            Self::RequestedDate => "requested_date",
        }
    }
}

/// How the billing cycle moves when a plan changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingCycleAlignment {
    Unchanged,
    PlanChangeDate,
    StartOfMonth,
}

impl WireEnum for BillingCycleAlignment {
    const NAME: &'static str = "BillingCycleAlignment";

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "unchanged" => Some(Self::Unchanged),
            "plan_change_date" => Some(Self::PlanChangeDate),
            "start_of_month" => Some(Self::StartOfMonth),
            _ => None,
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::PlanChangeDate => "plan_change_date",
            Self::StartOfMonth => "start_of_month",
        }
    }
}
