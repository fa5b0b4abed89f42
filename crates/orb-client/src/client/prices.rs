//! Price endpoints.

use orb_core::models::{NewPrice, Page, Price};

use crate::error::OrbResult;
use crate::http::HttpBackend;
use crate::params::{PriceCreateParams, PriceFetchParams, PriceListParams, PriceUpdateParams};

use super::OrbClient;

impl<B: HttpBackend> OrbClient<B> {
    /// Create a price outside of any plan.
    pub async fn create_price(&self, price: NewPrice) -> OrbResult<Price> {
        self.execute(&PriceCreateParams::new(price)).await
    }

    pub async fn fetch_price(&self, price_id: &str) -> OrbResult<Price> {
        self.execute(&PriceFetchParams::new(price_id)).await
    }

    /// Update a price's metadata.
    pub async fn update_price(&self, params: &PriceUpdateParams) -> OrbResult<Price> {
        self.execute(params).await
    }

    pub async fn list_prices(&self, params: &PriceListParams) -> OrbResult<Page<Price>> {
        self.execute(params).await
    }

    /// Every price, following cursors. Stops after 100 pages.
    pub async fn list_all_prices(&self, params: &PriceListParams) -> OrbResult<Vec<Price>> {
        self.collect_pages(params).await
    }
}
