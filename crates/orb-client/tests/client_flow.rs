//! End-to-end client flows against an in-memory backend.

use std::sync::Mutex;
use std::time::Duration;

use orb_client::orb_core::Validate;
use orb_client::orb_core::models::{ChangeOption, Price, SubscriptionStatus};
use orb_client::{
    ApiRequest, HttpBackend, HttpRequest, OrbClient, OrbClientConfig, OrbError, OrbResult,
    SubscriptionListParams, SubscriptionSchedulePlanChangeParams, async_trait,
};
use serde_json::{Value, json};

/// Replays a fixed sequence of results and records every request.
struct ScriptedBackend {
    script: Mutex<Vec<OrbResult<Value>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedBackend {
    fn new(mut script: Vec<OrbResult<Value>>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpBackend for ScriptedBackend {
    async fn send(&self, request: &HttpRequest) -> OrbResult<Value> {
        self.sent.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| panic!("unexpected request to {}", request.url))
    }
}

fn config() -> OrbClientConfig {
    OrbClientConfig::new()
        .with_api_key("sk_test")
        .with_base_url("https://orb.test/v1")
        .with_retry_delay(Duration::ZERO)
}

fn subscription(id: &str, price: Value) -> Value {
    json!({
        "id": id,
        "created_at": "2024-01-01T00:00:00Z",
        "start_date": "2024-01-01T00:00:00Z",
        "status": "active",
        "customer": {"id": "cus_1", "external_customer_id": "acme"},
        "plan": {"id": "plan_2", "name": "Scale"},
        "net_terms": 30,
        "billing_cycle_day": 1,
        "discount_intervals": [{
            "discount_type": "percentage",
            "percentage_discount": 0.1,
            "start_date": "2024-01-01T00:00:00Z"
        }],
        "price_intervals": [{
            "id": "pi_1",
            "billing_cycle_day": 1,
            "start_date": "2024-01-01T00:00:00Z",
            "price": price
        }]
    })
}

fn future_price() -> Value {
    json!({
        "id": "price_9",
        "model_type": "scalable_matrix_with_tiered_pricing",
        "scalable_matrix_with_tiered_pricing_config": {"first_dimension": "region"}
    })
}

#[tokio::test]
async fn test_schedule_plan_change_flow() {
    let backend = ScriptedBackend::new(vec![
        Err(OrbError::RateLimited {
            detail: "slow down".to_string(),
        }),
        Ok(subscription("sub_1", future_price())),
    ]);
    let client = OrbClient::with_backend(&config(), backend).unwrap();

    let params =
        SubscriptionSchedulePlanChangeParams::new("sub_1", "plan_2", ChangeOption::Immediate)
            .with_idempotency_key("change-1")
            .with_header("X-Request-Source", "billing-job")
            .with_body_param("price_overrides", json!([]));
    let sub = client.schedule_plan_change(&params).await.unwrap();

    assert_eq!(sub.status, SubscriptionStatus::Active);
    assert_eq!(sub.discount_intervals.len(), 1);

    // The unknown price model is kept and only rejected on validation.
    let price: &Price = &sub.price_interval("pi_1").unwrap().price;
    assert!(!price.is_resolved());
    assert_eq!(price.id(), Some("price_9"));
    let error = sub.validate().unwrap_err();
    assert_eq!(error.path(), vec!["price_intervals", "0", "price"]);

    let sent = client_requests(&client);
    assert_eq!(sent.len(), 2, "rate limited attempt is retried");
    let request = &sent[1];
    assert_eq!(
        request.url.as_str(),
        "https://orb.test/v1/subscriptions/sub_1/schedule_plan_change"
    );
    assert_eq!(request.header("Authorization"), Some("Bearer sk_test"));
    assert_eq!(request.header("Idempotency-Key"), Some("change-1"));
    assert_eq!(request.header("X-Request-Source"), Some("billing-job"));
    assert_eq!(
        request.body,
        Some(json!({
            "change_option": "immediate",
            "plan_id": "plan_2",
            "price_overrides": []
        }))
    );
}

#[tokio::test]
async fn test_response_validation_rejects_unknown_price_model() {
    let backend = ScriptedBackend::new(vec![Ok(subscription("sub_1", future_price()))]);
    let client =
        OrbClient::with_backend(&config().with_response_validation(true), backend).unwrap();

    let params =
        SubscriptionSchedulePlanChangeParams::new("sub_1", "plan_2", ChangeOption::Immediate);
    let result = client.schedule_plan_change(&params).await;
    assert!(matches!(result, Err(OrbError::Validation(_))));
}

#[tokio::test]
async fn test_strict_union_failure_is_invalid_response() {
    let mut raw = subscription("sub_1", future_price());
    raw["discount_intervals"][0]["discount_type"] = json!("bogo");
    let backend = ScriptedBackend::new(vec![Ok(raw)]);
    let client = OrbClient::with_backend(&config(), backend).unwrap();

    let error = client.fetch_subscription("sub_1").await.unwrap_err();
    match error {
        OrbError::InvalidResponse { message } => {
            assert!(message.contains("no valid union variant"));
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_query_is_built_from_params() {
    let backend = ScriptedBackend::new(vec![Ok(json!({
        "data": [],
        "pagination_metadata": {"has_more": false, "next_cursor": null}
    }))]);
    let client = OrbClient::with_backend(&config(), backend).unwrap();

    let params = SubscriptionListParams::new()
        .with_external_customer_id("acme")
        .with_status(SubscriptionStatus::Upcoming);
    let request = client.build_request(&params).unwrap();
    assert_eq!(
        request.url.query(),
        Some("external_customer_id%5B%5D=acme&status=upcoming")
    );
    assert_eq!(params.method().as_str(), "GET");

    let page = client.list_subscriptions(&params).await.unwrap();
    assert!(page.data.is_empty());
}

fn client_requests(client: &OrbClient<ScriptedBackend>) -> Vec<HttpRequest> {
    client.backend().sent()
}
