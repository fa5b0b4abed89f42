//! Parameters for the subscription endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use orb_core::models::{
    BillingCycleAlignment, CancelOption, ChangeOption, Metadata, Page, Subscription,
    SubscriptionStatus,
};
use orb_core::{ApiEnum, WireEnum};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ApiRequest, PaginatedRequest, RequestOptions, json_body, push_page_query};
use crate::error::{OrbError, OrbResult};
use crate::url::path_param;

macro_rules! impl_options {
    () => {
        fn options(&self) -> &RequestOptions {
            &self.options
        }

        fn options_mut(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    };
}

fn require_one_of(
    name: &'static str,
    first: Option<&String>,
    second: Option<&String>,
) -> OrbResult<()> {
    if first.is_some() || second.is_some() {
        Ok(())
    } else {
        Err(OrbError::InvalidParameter {
            name,
            reason: "one of the id or the external id must be set".to_string(),
        })
    }
}

// ============================================================================
// Create
// ============================================================================

/// `POST /subscriptions`
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_version_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_terms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_collection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_invoice_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_redemption_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_phase_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_billing_with_subscription_start_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip)]
    pub options: RequestOptions,
}

impl SubscriptionCreateParams {
    /// Subscribe an Orb customer to an Orb plan.
    pub fn new(customer_id: impl Into<String>, plan_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            plan_id: Some(plan_id.into()),
            ..Self::default()
        }
    }

    /// Subscribe using the caller's own customer and plan identifiers.
    pub fn external(
        external_customer_id: impl Into<String>,
        external_plan_id: impl Into<String>,
    ) -> Self {
        Self {
            external_customer_id: Some(external_customer_id.into()),
            external_plan_id: Some(external_plan_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub const fn with_net_terms(mut self, net_terms: i64) -> Self {
        self.net_terms = Some(net_terms);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl ApiRequest for SubscriptionCreateParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> OrbResult<String> {
        Ok("/subscriptions".to_string())
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        require_one_of(
            "customer_id",
            self.customer_id.as_ref(),
            self.external_customer_id.as_ref(),
        )?;
        require_one_of(
            "plan_id",
            self.plan_id.as_ref(),
            self.external_plan_id.as_ref(),
        )?;
        json_body(self, &self.options)
    }

    impl_options!();
}

// ============================================================================
// Fetch
// ============================================================================

/// `GET /subscriptions/{subscription_id}`
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFetchParams {
    pub subscription_id: String,
    pub options: RequestOptions,
}

impl SubscriptionFetchParams {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            options: RequestOptions::default(),
        }
    }
}

impl ApiRequest for SubscriptionFetchParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("subscription_id", &self.subscription_id)?;
        Ok(format!("/subscriptions/{id}"))
    }

    impl_options!();
}

// ============================================================================
// Update
// ============================================================================

/// `PUT /subscriptions/{subscription_id}`
///
/// A metadata value of `None` deletes that key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscriptionUpdateParams {
    #[serde(skip)]
    pub subscription_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_collection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_invoice_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoicing_threshold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_terms: Option<i64>,
    #[serde(skip)]
    pub options: RequestOptions,
}

impl SubscriptionUpdateParams {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            ..Self::default()
        }
    }

    /// Set (`Some`) or delete (`None`) one metadata key.
    #[must_use]
    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }

    #[must_use]
    pub const fn with_auto_collection(mut self, enabled: bool) -> Self {
        self.auto_collection = Some(enabled);
        self
    }

    #[must_use]
    pub const fn with_net_terms(mut self, net_terms: i64) -> Self {
        self.net_terms = Some(net_terms);
        self
    }
}

impl ApiRequest for SubscriptionUpdateParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("subscription_id", &self.subscription_id)?;
        Ok(format!("/subscriptions/{id}"))
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        json_body(self, &self.options)
    }

    impl_options!();
}

// ============================================================================
// List
// ============================================================================

/// `GET /subscriptions`
#[derive(Debug, Clone, Default)]
pub struct SubscriptionListParams {
    pub customer_id: Vec<String>,
    pub external_customer_id: Vec<String>,
    pub status: Option<ApiEnum<SubscriptionStatus>>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lt: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub options: RequestOptions,
}

impl SubscriptionListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id.push(customer_id.into());
        self
    }

    #[must_use]
    pub fn with_external_customer_id(mut self, external_customer_id: impl Into<String>) -> Self {
        self.external_customer_id.push(external_customer_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl ApiRequest for SubscriptionListParams {
    type Response = Page<Subscription>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> OrbResult<String> {
        Ok("/subscriptions".to_string())
    }

    fn query(&self) -> OrbResult<Vec<(String, String)>> {
        let mut query = Vec::new();
        for id in &self.customer_id {
            query.push(("customer_id[]".to_string(), id.clone()));
        }
        for id in &self.external_customer_id {
            query.push(("external_customer_id[]".to_string(), id.clone()));
        }
        if let Some(ref status) = self.status {
            let Some(known) = status.known() else {
                return Err(OrbError::InvalidParameter {
                    name: "status",
                    reason: format!("unrecognized value {:?}", status.raw()),
                });
            };
            query.push(("status".to_string(), known.as_wire().to_string()));
        }
        if let Some(gte) = self.created_at_gte {
            query.push(("created_at[gte]".to_string(), gte.to_rfc3339()));
        }
        if let Some(lt) = self.created_at_lt {
            query.push(("created_at[lt]".to_string(), lt.to_rfc3339()));
        }
        push_page_query(&mut query, self.limit, self.cursor.as_deref());
        Ok(query)
    }

    impl_options!();
}

impl PaginatedRequest for SubscriptionListParams {
    type Item = Subscription;

    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }
}

// ============================================================================
// Cancel
// ============================================================================

/// `POST /subscriptions/{subscription_id}/cancel`
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionCancelParams {
    #[serde(skip)]
    pub subscription_id: String,
    pub cancel_option: ApiEnum<CancelOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_invoice_credit_or_void: Option<bool>,
    #[serde(skip)]
    pub options: RequestOptions,
}

impl SubscriptionCancelParams {
    pub fn new(subscription_id: impl Into<String>, cancel_option: CancelOption) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            cancel_option: cancel_option.into(),
            cancellation_date: None,
            allow_invoice_credit_or_void: None,
            options: RequestOptions::default(),
        }
    }

    /// Cancel on `date`.
    pub fn on(subscription_id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            cancellation_date: Some(date),
            ..Self::new(subscription_id, CancelOption::RequestedDate)
        }
    }
}

impl ApiRequest for SubscriptionCancelParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("subscription_id", &self.subscription_id)?;
        Ok(format!("/subscriptions/{id}/cancel"))
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        if self.cancel_option == CancelOption::RequestedDate && self.cancellation_date.is_none() {
            return Err(OrbError::InvalidParameter {
                name: "cancellation_date",
                reason: "required when cancel_option is requested_date".to_string(),
            });
        }
        json_body(self, &self.options)
    }

    impl_options!();
}

// ============================================================================
// Schedule plan change
// ============================================================================

/// `POST /subscriptions/{subscription_id}/schedule_plan_change`
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionSchedulePlanChangeParams {
    #[serde(skip)]
    pub subscription_id: String,
    pub change_option: ApiEnum<ChangeOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_version_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle_alignment: Option<ApiEnum<BillingCycleAlignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_billing_with_plan_change_date: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_redemption_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_phase_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_collection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_invoice_memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_terms: Option<i64>,
    #[serde(skip)]
    pub options: RequestOptions,
}

impl SubscriptionSchedulePlanChangeParams {
    pub fn new(
        subscription_id: impl Into<String>,
        plan_id: impl Into<String>,
        change_option: ChangeOption,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            change_option: change_option.into(),
            plan_id: Some(plan_id.into()),
            external_plan_id: None,
            plan_version_number: None,
            change_date: None,
            billing_cycle_alignment: None,
            align_billing_with_plan_change_date: None,
            coupon_redemption_code: None,
            initial_phase_order: None,
            auto_collection: None,
            default_invoice_memo: None,
            net_terms: None,
            options: RequestOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_change_date(mut self, change_date: DateTime<Utc>) -> Self {
        self.change_date = Some(change_date);
        self
    }

    #[must_use]
    pub fn with_billing_cycle_alignment(mut self, alignment: BillingCycleAlignment) -> Self {
        self.billing_cycle_alignment = Some(alignment.into());
        self
    }

    #[must_use]
    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_redemption_code = Some(code.into());
        self
    }
}

impl ApiRequest for SubscriptionSchedulePlanChangeParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("subscription_id", &self.subscription_id)?;
        Ok(format!("/subscriptions/{id}/schedule_plan_change"))
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        require_one_of(
            "plan_id",
            self.plan_id.as_ref(),
            self.external_plan_id.as_ref(),
        )?;
        if self.change_option == ChangeOption::RequestedDate && self.change_date.is_none() {
            return Err(OrbError::InvalidParameter {
                name: "change_date",
                reason: "required when change_option is requested_date".to_string(),
            });
        }
        json_body(self, &self.options)
    }

    impl_options!();
}

// ============================================================================
// Unschedule pending plan changes
// ============================================================================

/// `POST /subscriptions/{subscription_id}/unschedule_pending_plan_changes`
#[derive(Debug, Clone, Default)]
pub struct SubscriptionUnschedulePendingPlanChangesParams {
    pub subscription_id: String,
    pub options: RequestOptions,
}

impl SubscriptionUnschedulePendingPlanChangesParams {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            options: RequestOptions::default(),
        }
    }
}

impl ApiRequest for SubscriptionUnschedulePendingPlanChangesParams {
    type Response = Subscription;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("subscription_id", &self.subscription_id)?;
        Ok(format!("/subscriptions/{id}/unschedule_pending_plan_changes"))
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        if self.options.extra_body.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.options.extra_body.clone().into_value()))
        }
    }

    impl_options!();
}
