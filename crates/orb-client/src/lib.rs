//! Async client for the Orb subscription-billing API.
//!
//! ```no_run
//! use orb_client::{DefaultOrbClient, OrbClientConfig, SubscriptionListParams};
//!
//! # async fn run() -> orb_client::OrbResult<()> {
//! let client = DefaultOrbClient::new(&OrbClientConfig::from_env())?;
//! let subscriptions = client
//!     .list_all_subscriptions(&SubscriptionListParams::new().with_customer_id("cus_1"))
//!     .await?;
//! for sub in &subscriptions {
//!     println!("{} {}", sub.id, sub.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Responses are decoded leniently: unknown enum values and unknown price
//! models are kept as raw data. Call `validate()` on a response, or enable
//! [`OrbClientConfig::with_response_validation`], to reject them.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod params;
mod parsing;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultOrbClient, OrbClient};

// Configuration
pub use config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, OrbClientConfig};

// Errors
pub use error::{OrbError, OrbResult};

// Transport
pub use http::{HttpBackend, HttpRequest, ReqwestBackend};

// Request parameters
pub use params::{
    ApiRequest, PaginatedRequest, PriceCreateParams, PriceFetchParams, PriceListParams,
    PriceUpdateParams, RequestOptions, SubscriptionCancelParams, SubscriptionCreateParams,
    SubscriptionFetchParams, SubscriptionListParams, SubscriptionSchedulePlanChangeParams,
    SubscriptionUnschedulePendingPlanChangesParams, SubscriptionUpdateParams,
};

// The wire model, re-exported so callers need only one dependency
pub use orb_core;

// Async trait support for custom backends
pub use async_trait::async_trait;
