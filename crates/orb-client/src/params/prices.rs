//! Parameters for the price endpoints.

use std::collections::BTreeMap;

use orb_core::Validate;
use orb_core::models::{NewPrice, Page, Price};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ApiRequest, PaginatedRequest, RequestOptions, json_body, push_page_query};
use crate::error::OrbResult;
use crate::url::path_param;

/// `POST /prices`
#[derive(Debug, Clone)]
pub struct PriceCreateParams {
    pub price: NewPrice,
    pub options: RequestOptions,
}

impl PriceCreateParams {
    pub fn new(price: NewPrice) -> Self {
        Self {
            price,
            options: RequestOptions::default(),
        }
    }
}

impl ApiRequest for PriceCreateParams {
    type Response = Price;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> OrbResult<String> {
        Ok("/prices".to_string())
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        self.price.validate()?;
        json_body(&self.price, &self.options)
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

/// `GET /prices/{price_id}`
#[derive(Debug, Clone, Default)]
pub struct PriceFetchParams {
    pub price_id: String,
    pub options: RequestOptions,
}

impl PriceFetchParams {
    pub fn new(price_id: impl Into<String>) -> Self {
        Self {
            price_id: price_id.into(),
            options: RequestOptions::default(),
        }
    }
}

impl ApiRequest for PriceFetchParams {
    type Response = Price;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("price_id", &self.price_id)?;
        Ok(format!("/prices/{id}"))
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

/// `PUT /prices/{price_id}`. Only metadata can change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceUpdateParams {
    #[serde(skip)]
    pub price_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Option<String>>>,
    #[serde(skip)]
    pub options: RequestOptions,
}

impl PriceUpdateParams {
    pub fn new(price_id: impl Into<String>) -> Self {
        Self {
            price_id: price_id.into(),
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
}

impl ApiRequest for PriceUpdateParams {
    type Response = Price;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> OrbResult<String> {
        let id = path_param("price_id", &self.price_id)?;
        Ok(format!("/prices/{id}"))
    }

    fn body(&self) -> OrbResult<Option<Value>> {
        json_body(self, &self.options)
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

/// `GET /prices`
#[derive(Debug, Clone, Default)]
pub struct PriceListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub options: RequestOptions,
}

impl PriceListParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl ApiRequest for PriceListParams {
    type Response = Page<Price>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> OrbResult<String> {
        Ok("/prices".to_string())
    }

    fn query(&self) -> OrbResult<Vec<(String, String)>> {
        let mut query = Vec::new();
        push_page_query(&mut query, self.limit, self.cursor.as_deref());
        Ok(query)
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

impl PaginatedRequest for PriceListParams {
    type Item = Price;

    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrbError;
    use orb_core::ApiEnum;
    use orb_core::models::{Cadence, NewPriceCommon};
    use serde_json::json;

    fn new_unit_price() -> NewPrice {
        NewPrice::unit(
            NewPriceCommon::new("API calls", "item_1", Cadence::Monthly, "USD"),
            "0.01",
        )
    }

    #[test]
    fn test_create_body_is_the_new_price() {
        let params = PriceCreateParams::new(new_unit_price())
            .with_body_param("invoice_grouping_key", json!("region"));
        let body = params.body().unwrap().unwrap();
        assert_eq!(body["model_type"], "unit");
        assert_eq!(body["unit_config"], json!({"unit_amount": "0.01"}));
        assert_eq!(body["invoice_grouping_key"], "region");
        assert_eq!(params.path().unwrap(), "/prices");
    }

    #[test]
    fn test_create_rejects_unrecognized_cadence() {
        let mut price = new_unit_price();
        if let NewPrice::Unit { common, .. } = &mut price {
            common.cadence = ApiEnum::Unrecognized("hourly".to_string());
        }
        let result = PriceCreateParams::new(price).body();
        assert!(matches!(result, Err(OrbError::Validation(_))));
    }

    #[test]
    fn test_fetch_and_update_paths() {
        assert_eq!(
            PriceFetchParams::new("price_1").path().unwrap(),
            "/prices/price_1"
        );
        assert!(PriceFetchParams::new("").path().is_err());

        let update = PriceUpdateParams::new("price_1").with_metadata_entry("k", None);
        assert_eq!(update.method(), Method::PUT);
        assert_eq!(update.body().unwrap().unwrap(), json!({"metadata": {"k": null}}));
    }

    #[test]
    fn test_list_query() {
        let mut params = PriceListParams::new().with_limit(5);
        params.set_cursor(Some("next".to_string()));
        assert_eq!(
            params.query().unwrap(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("cursor".to_string(), "next".to_string()),
            ]
        );
    }
}
