//! Subscription endpoints.

use orb_core::models::{Page, Subscription};

use crate::error::OrbResult;
use crate::http::HttpBackend;
use crate::params::{
    SubscriptionCancelParams, SubscriptionCreateParams, SubscriptionFetchParams,
    SubscriptionListParams, SubscriptionSchedulePlanChangeParams,
    SubscriptionUnschedulePendingPlanChangesParams, SubscriptionUpdateParams,
};

use super::OrbClient;

impl<B: HttpBackend> OrbClient<B> {
    /// Create a subscription for a customer on a plan.
    pub async fn create_subscription(
        &self,
        params: &SubscriptionCreateParams,
    ) -> OrbResult<Subscription> {
        self.execute(params).await
    }

    pub async fn fetch_subscription(&self, subscription_id: &str) -> OrbResult<Subscription> {
        self.execute(&SubscriptionFetchParams::new(subscription_id))
            .await
    }

    /// Update metadata, memo, net terms or auto-collection.
    pub async fn update_subscription(
        &self,
        params: &SubscriptionUpdateParams,
    ) -> OrbResult<Subscription> {
        self.execute(params).await
    }

    /// One page of subscriptions.
    pub async fn list_subscriptions(
        &self,
        params: &SubscriptionListParams,
    ) -> OrbResult<Page<Subscription>> {
        self.execute(params).await
    }

    /// Every subscription matching `params`, following cursors.
    ///
    /// Stops after 100 pages.
    pub async fn list_all_subscriptions(
        &self,
        params: &SubscriptionListParams,
    ) -> OrbResult<Vec<Subscription>> {
        self.collect_pages(params).await
    }

    pub async fn cancel_subscription(
        &self,
        params: &SubscriptionCancelParams,
    ) -> OrbResult<Subscription> {
        self.execute(params).await
    }

    /// Move a subscription to another plan, now or later.
    pub async fn schedule_plan_change(
        &self,
        params: &SubscriptionSchedulePlanChangeParams,
    ) -> OrbResult<Subscription> {
        self.execute(params).await
    }

    /// Drop any plan change that has not taken effect yet.
    pub async fn unschedule_pending_plan_changes(
        &self,
        subscription_id: &str,
    ) -> OrbResult<Subscription> {
        self.execute(&SubscriptionUnschedulePendingPlanChangesParams::new(
            subscription_id,
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{subscription_json, test_config};
    use crate::error::OrbError;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use crate::params::ApiRequest;
    use orb_core::models::{CancelOption, ChangeOption, SubscriptionStatus};
    use reqwest::Method;
    use serde_json::json;

    fn page(ids: &[&str], next_cursor: Option<&str>) -> serde_json::Value {
        json!({
            "data": ids.iter().map(|id| subscription_json(id)).collect::<Vec<_>>(),
            "pagination_metadata": {
                "has_more": next_cursor.is_some(),
                "next_cursor": next_cursor
            }
        })
    }

    #[tokio::test]
    async fn test_create_subscription_sends_body() {
        let backend =
            FakeBackend::new().with_json("POST /v1/subscriptions", subscription_json("sub_new"));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let sub = client
            .create_subscription(&SubscriptionCreateParams::new("cus_1", "plan_1"))
            .await
            .unwrap();
        assert_eq!(sub.id, "sub_new");

        let sent = &client.backend.requests()[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.body,
            Some(json!({"customer_id": "cus_1", "plan_id": "plan_1"}))
        );
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_fetch_subscription_not_found() {
        let backend = FakeBackend::new().with_response(
            "GET /v1/subscriptions/sub_missing",
            CannedResponse::status(404),
        );
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let result = client.fetch_subscription("sub_missing").await;
        assert!(matches!(result, Err(OrbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_subscriptions_single_page() {
        let backend =
            FakeBackend::new().with_json("GET /v1/subscriptions", page(&["a", "b"], None));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let params = SubscriptionListParams::new()
            .with_status(SubscriptionStatus::Active)
            .with_limit(2);
        let result = client.list_subscriptions(&params).await.unwrap();
        assert_eq!(result.data.len(), 2);
        assert!(result.next_cursor().is_none());

        let sent = &client.backend.requests()[0];
        assert_eq!(sent.url.query(), Some("status=active&limit=2"));
    }

    #[tokio::test]
    async fn test_list_all_subscriptions_follows_cursor() {
        let backend = FakeBackend::new()
            .with_json("cursor=c2", page(&["c"], None))
            .with_json("cursor=c1", page(&["b"], Some("c2")))
            .with_json("GET /v1/subscriptions", page(&["a"], Some("c1")));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let all = client
            .list_all_subscriptions(&SubscriptionListParams::new())
            .await
            .unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(client.backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_list_all_subscriptions_stops_at_page_limit() {
        let backend =
            FakeBackend::new().with_json("GET /v1/subscriptions", page(&["x"], Some("again")));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let all = client
            .list_all_subscriptions(&SubscriptionListParams::new())
            .await
            .unwrap();
        assert_eq!(all.len(), 100);
    }

    #[tokio::test]
    async fn test_cancel_and_plan_change_paths() {
        let backend =
            FakeBackend::new().with_json("POST /v1/subscriptions/sub_1/", subscription_json("sub_1"));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        client
            .cancel_subscription(&SubscriptionCancelParams::new(
                "sub_1",
                CancelOption::EndOfSubscriptionTerm,
            ))
            .await
            .unwrap();
        client
            .schedule_plan_change(&SubscriptionSchedulePlanChangeParams::new(
                "sub_1",
                "plan_2",
                ChangeOption::Immediate,
            ))
            .await
            .unwrap();
        client.unschedule_pending_plan_changes("sub_1").await.unwrap();

        let paths: Vec<String> = client
            .backend
            .requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/v1/subscriptions/sub_1/cancel",
                "/v1/subscriptions/sub_1/schedule_plan_change",
                "/v1/subscriptions/sub_1/unschedule_pending_plan_changes",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_subscription_uses_put() {
        let backend =
            FakeBackend::new().with_json("PUT /v1/subscriptions/sub_1", subscription_json("sub_1"));
        let client = OrbClient::with_backend(&test_config(), backend).unwrap();

        let params = SubscriptionUpdateParams::new("sub_1").with_net_terms(45);
        assert_eq!(params.method(), Method::PUT);
        client.update_subscription(&params).await.unwrap();

        let sent = &client.backend.requests()[0];
        assert_eq!(sent.body, Some(json!({"net_terms": 45})));
    }
}
