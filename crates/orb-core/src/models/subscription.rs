//! Subscriptions and the price intervals they bill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::models::discount_interval::DiscountInterval;
use crate::models::enums::SubscriptionStatus;
use crate::models::price::Price;
use crate::models::shared::{CustomerSlim, Metadata, PlanSlim};
use crate::validate::{self, Validate};
use crate::wire::{ApiEnum, Model};

/// A scheduled change to the quantity of a fixed fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFeeQuantityTransition {
    pub effective_date: DateTime<Utc>,
    pub price_id: String,
    pub quantity: i64,
}

/// A price billed on a subscription over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInterval {
    pub id: String,
    pub billing_cycle_day: i64,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_billing_period_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_billing_period_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fixed_fee_quantity_transitions: Vec<FixedFeeQuantityTransition>,
    pub price: Price,
    #[serde(default)]
    pub usage_customer_ids: Option<Vec<String>>,
}

impl Validate for PriceInterval {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("price", &self.price)
    }
}

impl Model for PriceInterval {
    const NAME: &'static str = "PriceInterval";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["id", "billing_cycle_day", "start_date", "price"];
}

/// A customer's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_billing_period_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_billing_period_end_date: Option<DateTime<Utc>>,
    pub status: ApiEnum<SubscriptionStatus>,
    pub customer: CustomerSlim,
    #[serde(default)]
    pub plan: Option<PlanSlim>,
    pub net_terms: i64,
    #[serde(default)]
    pub auto_collection: Option<bool>,
    pub billing_cycle_day: i64,
    #[serde(default)]
    pub default_invoice_memo: Option<String>,
    #[serde(default)]
    pub invoicing_threshold: Option<String>,
    #[serde(default)]
    pub active_plan_phase_order: Option<i64>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub discount_intervals: Vec<DiscountInterval>,
    #[serde(default)]
    pub price_intervals: Vec<PriceInterval>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Discount intervals in effect at `at`.
    pub fn discounts_active_at(&self, at: DateTime<Utc>) -> impl Iterator<Item = &DiscountInterval> {
        self.discount_intervals
            .iter()
            .filter(move |d| d.is_active_at(at))
    }

    /// Look up a price interval by id.
    pub fn price_interval(&self, id: &str) -> Option<&PriceInterval> {
        self.price_intervals.iter().find(|p| p.id == id)
    }
}

impl Validate for Subscription {
    fn validate(&self) -> ValidationResult<()> {
        validate::field("status", &self.status)?;
        validate::field("customer", &self.customer)?;
        validate::field("plan", &self.plan)?;
        validate::field("discount_intervals", &self.discount_intervals)?;
        validate::field("price_intervals", &self.price_intervals)
    }
}

impl Model for Subscription {
    const NAME: &'static str = "Subscription";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "id",
        "created_at",
        "start_date",
        "status",
        "customer",
        "net_terms",
        "billing_cycle_day",
    ];
}
