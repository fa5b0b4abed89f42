//! Orb client for subscriptions and prices.
//!
//! This module provides the main client interface. Endpoint methods live in
//! the submodules; they all funnel through [`OrbClient::execute`].

mod prices;
mod subscriptions;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{ClientSettings, OrbClientConfig};
use crate::error::{OrbError, OrbResult};
use crate::http::{HttpBackend, HttpRequest, ReqwestBackend};
use crate::params::{ApiRequest, PaginatedRequest};
use crate::parsing::decode_response;
use crate::url::build_endpoint_url;

/// Upper bound on pages fetched by the `list_all_*` methods.
const MAX_PAGES: usize = 100;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Orb client using the reqwest HTTP backend.
pub type DefaultOrbClient = OrbClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Orb API.
///
/// Generic over an HTTP backend. Use `DefaultOrbClient` in production code
/// and [`OrbClient::with_backend`] to inject a fake.
pub struct OrbClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) settings: ClientSettings,
}

impl DefaultOrbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &OrbClientConfig) -> OrbResult<Self> {
        let settings = config.resolve()?;
        let backend = ReqwestBackend::new(&settings)?;
        Ok(Self { backend, settings })
    }

    /// Create a client configured from `ORB_API_KEY` and `ORB_BASE_URL`.
    pub fn from_env() -> OrbResult<Self> {
        Self::new(&OrbClientConfig::from_env())
    }
}

impl<B: HttpBackend> OrbClient<B> {
    /// Create a new client with a custom backend.
    pub fn with_backend(config: &OrbClientConfig, backend: B) -> OrbResult<Self> {
        Ok(Self {
            backend,
            settings: config.resolve()?,
        })
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the request for `params` without sending it.
    pub fn build_request<P: ApiRequest>(&self, params: &P) -> OrbResult<HttpRequest> {
        let url = build_endpoint_url(&self.settings.base_url, &params.path()?, &params.query()?);
        let method = params.method();
        let body = params.body()?;
        let options = params.options();
        if body.is_none() && !options.extra_body.is_empty() {
            return Err(OrbError::InvalidParameter {
                name: "extra_body",
                reason: format!("{method} requests do not send a body"),
            });
        }

        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.settings.api_key),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), self.settings.user_agent.clone()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        // Retries resend this request, so a generated key covers every attempt.
        let idempotency_key = options.idempotency_key.clone().or_else(|| {
            (method != Method::GET).then(|| format!("orb-{}", Uuid::new_v4()))
        });
        if let Some(key) = idempotency_key {
            headers.push(("Idempotency-Key".to_string(), key));
        }
        for (name, value) in &options.extra_headers {
            headers.push((name.clone(), value.clone()));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send `params` and decode the response.
    ///
    /// Responses are validated when the client was configured with
    /// `with_response_validation(true)`.
    pub async fn execute<P: ApiRequest>(&self, params: &P) -> OrbResult<P::Response> {
        let request = self.build_request(params)?;
        debug!(method = %request.method, url = %request.url, "Sending Orb API request");

        let value = self.send_with_retry(&request).await?;
        decode_response(value, self.settings.validate_responses)
    }

    /// Fetch every page of a list endpoint.
    pub(crate) async fn collect_pages<P>(&self, params: &P) -> OrbResult<Vec<P::Item>>
    where
        P: PaginatedRequest,
    {
        let mut params = params.clone();
        let mut items = Vec::new();

        for _ in 0..MAX_PAGES {
            let page = self.execute(&params).await?;
            let next = page.next_cursor().map(str::to_string);
            items.extend(page.data);

            match next {
                Some(cursor) => params.set_cursor(Some(cursor)),
                None => return Ok(items),
            }
        }

        warn!(pages = MAX_PAGES, "Stopped paging at the page limit");
        Ok(items)
    }

    /// Send with exponential backoff for retryable failures.
    async fn send_with_retry(&self, request: &HttpRequest) -> OrbResult<Value> {
        let max_retries = self.settings.max_retries;
        let mut last_error: Option<OrbError> = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.settings.retry_delay(attempt)).await;
            }

            match self.backend.send(request).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    warn!(
                        attempt = attempt + 1,
                        max_retries,
                        url = %request.url,
                        error = %e,
                        "Retrying Orb API request"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| OrbError::InvalidResponse {
            message: "Unknown error during request".to_string(),
        }))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::MockHttpBackend;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use crate::params::{PriceFetchParams, SubscriptionCreateParams, SubscriptionFetchParams};
    use orb_core::models::Subscription;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    pub fn test_config() -> OrbClientConfig {
        OrbClientConfig::new()
            .with_api_key("test-key")
            .with_base_url("https://api.test/v1")
            .with_retry_delay(Duration::ZERO)
    }

    pub fn subscription_json(id: &str) -> Value {
        json!({
            "id": id,
            "created_at": "2024-01-01T00:00:00Z",
            "start_date": "2024-01-01T00:00:00Z",
            "status": "active",
            "customer": {"id": "cus_1"},
            "net_terms": 30,
            "billing_cycle_day": 1,
            "price_intervals": []
        })
    }

    #[test]
    fn test_default_client_requires_key() {
        assert!(matches!(
            DefaultOrbClient::new(&OrbClientConfig::new()),
            Err(OrbError::MissingApiKey)
        ));
        assert_ok!(DefaultOrbClient::new(&test_config()));
    }

    #[test]
    fn test_build_request_headers() {
        let client = OrbClient::with_backend(&test_config(), FakeBackend::new()).unwrap();
        let params = SubscriptionFetchParams::new("sub_1")
            .with_idempotency_key("idem-1")
            .with_header("X-Trace", "t1");

        let request = client.build_request(&params).unwrap();
        assert_eq!(request.url.as_str(), "https://api.test/v1/subscriptions/sub_1");
        assert_eq!(request.header("authorization"), Some("Bearer test-key"));
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("Idempotency-Key"), Some("idem-1"));
        assert_eq!(request.header("X-Trace"), Some("t1"));
        assert_eq!(request.header("Content-Type"), None);
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_retried_post_reuses_generated_idempotency_key() {
        let backend = FakeBackend::new()
            .with_response("POST /v1/subscriptions", CannedResponse::status(500))
            .with_json("POST /v1/subscriptions", subscription_json("sub_1"));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        assert_ok!(
            client
                .execute(&SubscriptionCreateParams::new("cus_1", "plan_1"))
                .await
        );

        let sent = client.backend.requests();
        assert_eq!(sent.len(), 2);
        let key = sent[0].header("Idempotency-Key").unwrap();
        assert!(key.starts_with("orb-"));
        assert_eq!(sent[1].header("Idempotency-Key"), Some(key));

        // Each logical call gets its own key.
        let other = client
            .build_request(&SubscriptionCreateParams::new("cus_1", "plan_1"))
            .unwrap();
        assert_ne!(other.header("Idempotency-Key"), Some(key));
    }

    #[test]
    fn test_caller_idempotency_key_wins_and_gets_have_none() {
        let client = OrbClient::with_backend(&test_config(), FakeBackend::new()).unwrap();

        let create =
            SubscriptionCreateParams::new("cus_1", "plan_1").with_idempotency_key("k1");
        let request = client.build_request(&create).unwrap();
        assert_eq!(request.header("Idempotency-Key"), Some("k1"));

        let fetch = client
            .build_request(&SubscriptionFetchParams::new("sub_1"))
            .unwrap();
        assert_eq!(fetch.header("Idempotency-Key"), None);
    }

    #[test]
    fn test_extra_body_rejected_without_body() {
        let client = OrbClient::with_backend(&test_config(), FakeBackend::new()).unwrap();
        let params =
            SubscriptionFetchParams::new("sub_1").with_body_param("expand", json!(["plan"]));

        let result = client.build_request(&params);
        assert!(matches!(
            result,
            Err(OrbError::InvalidParameter {
                name: "extra_body",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_empty_path_param_fails_before_io() {
        let backend = FakeBackend::new();
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let result = client.execute(&PriceFetchParams::new("")).await;
        assert!(matches!(result, Err(OrbError::InvalidParameter { .. })));
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let backend = FakeBackend::new()
            .with_response("GET /v1/subscriptions/sub_1", CannedResponse::status(502))
            .with_response("GET /v1/subscriptions/sub_1", CannedResponse::status(503))
            .with_json("GET /v1/subscriptions/sub_1", subscription_json("sub_1"));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let sub: Subscription = assert_ok!(
            client
                .execute(&SubscriptionFetchParams::new("sub_1"))
                .await
        );
        assert_eq!(sub.id, "sub_1");
        assert_eq!(client.backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let mut backend = MockHttpBackend::new();
        backend.expect_send().times(3).returning(|request| {
            Err(OrbError::from_status(
                500,
                request.url.as_str(),
                "boom".to_string(),
            ))
        });
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let error = assert_err!(
            client
                .execute(&SubscriptionFetchParams::new("sub_1"))
                .await
        );
        assert_eq!(error.status(), Some(500));
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let mut backend = MockHttpBackend::new();
        backend
            .expect_send()
            .times(1)
            .returning(|request| {
                Err(OrbError::from_status(
                    404,
                    request.url.as_str(),
                    String::new(),
                ))
            });
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let result = client.execute(&SubscriptionFetchParams::new("sub_9")).await;
        assert!(matches!(result, Err(OrbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_decode_errors_are_not_retried() {
        let mut backend = MockHttpBackend::new();
        backend
            .expect_send()
            .times(1)
            .returning(|_| Ok(json!({"id": "sub_1"})));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let result = client.execute(&SubscriptionFetchParams::new("sub_1")).await;
        assert!(matches!(result, Err(OrbError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_response_validation_surfaces_unknown_values() {
        let mut raw = subscription_json("sub_1");
        raw["status"] = json!("paused");

        let lenient = OrbClient::with_backend(
            &test_config(),
            FakeBackend::new().with_json("subscriptions", raw.clone()),
        )
        .unwrap();
        let sub = assert_ok!(lenient.execute(&SubscriptionFetchParams::new("sub_1")).await);
        assert_eq!(sub.status.raw(), "paused");

        let strict = OrbClient::with_backend(
            &test_config().with_response_validation(true),
            FakeBackend::new().with_json("subscriptions", raw),
        )
        .unwrap();
        let result = strict.execute(&SubscriptionFetchParams::new("sub_1")).await;
        assert!(matches!(result, Err(OrbError::Validation(_))));
    }
}
