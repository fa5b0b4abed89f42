//! Request parameter builders, one per endpoint.
//!
//! Each params type knows its method, path, query and body. Anything the
//! typed fields do not cover can be attached through [`RequestOptions`]:
//! extra body properties are flattened into the JSON body and extra
//! headers are sent after the standard ones.

mod prices;
mod subscriptions;

use std::collections::BTreeMap;

use orb_core::models::Page;
use orb_core::{RawObject, Validate};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::OrbResult;

pub use prices::{PriceCreateParams, PriceFetchParams, PriceListParams, PriceUpdateParams};
pub use subscriptions::{
    SubscriptionCancelParams, SubscriptionCreateParams, SubscriptionFetchParams,
    SubscriptionListParams, SubscriptionSchedulePlanChangeParams,
    SubscriptionUnschedulePendingPlanChangesParams, SubscriptionUpdateParams,
};

/// Per-request additions beyond the typed parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra headers, sent in key order.
    pub extra_headers: BTreeMap<String, String>,
    /// Extra body properties; these win over typed fields on conflict.
    pub extra_body: RawObject,
    pub idempotency_key: Option<String>,
}

/// An endpoint call: how to address it and what it returns.
pub trait ApiRequest: Send + Sync {
    type Response: DeserializeOwned + Validate + Send;

    fn method(&self) -> Method;

    /// Path below the base URL, with path parameters already substituted.
    fn path(&self) -> OrbResult<String>;

    /// Query pairs in send order.
    fn query(&self) -> OrbResult<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> OrbResult<Option<Value>> {
        Ok(None)
    }

    fn options(&self) -> &RequestOptions;

    fn options_mut(&mut self) -> &mut RequestOptions;

    /// Send an additional header with this request.
    #[must_use]
    fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut()
            .extra_headers
            .insert(name.into(), value.into());
        self
    }

    /// Add a body property the typed parameters do not model.
    ///
    /// Endpoints without a request body reject these when the request is
    /// built.
    #[must_use]
    fn with_body_param(mut self, key: impl Into<String>, value: Value) -> Self
    where
        Self: Sized,
    {
        self.options_mut().extra_body.insert(key, value);
        self
    }

    #[must_use]
    fn with_idempotency_key(mut self, key: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().idempotency_key = Some(key.into());
        self
    }
}

/// A list endpoint that pages with a cursor.
pub trait PaginatedRequest: ApiRequest<Response = Page<Self::Item>> + Clone {
    type Item: DeserializeOwned + Validate + Send;

    fn set_cursor(&mut self, cursor: Option<String>);
}

/// Serialize typed parameters and flatten the extra body properties in.
pub(crate) fn json_body<T: Serialize>(
    params: &T,
    options: &RequestOptions,
) -> OrbResult<Option<Value>> {
    let mut body = RawObject::from_model(params)?;
    body.merge(&options.extra_body);
    Ok(Some(body.into_value()))
}

/// Append `limit` and `cursor` pairs when set.
pub(crate) fn push_page_query(
    query: &mut Vec<(String, String)>,
    limit: Option<u32>,
    cursor: Option<&str>,
) {
    if let Some(limit) = limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(cursor) = cursor {
        query.push(("cursor".to_string(), cursor.to_string()));
    }
}
