//! # Larek API
//!
//! The three endpoints the storefront uses, behind a trait so handlers can
//! be driven by a fake in tests.
//!
//! ```text
//! GET  /product/      → ApiListResponse<Product> → Vec<Product>
//! GET  /product/{id}  → Product
//! POST /order         → OrderResult
//! ```
//!
//! Product images come back as paths (`/5_Dots.svg`) and are prefixed with
//! the CDN base before leaving this module.

use async_trait::async_trait;
use tracing::info;

use larek_core::{OrderRequest, OrderResult, Product};

use crate::client::{Api, ApiListResponse};
use crate::error::ApiResult;

/// Storefront-facing API operations.
///
/// Futures are not required to be `Send`: the storefront drives them on a
/// single-threaded `LocalSet`.
#[async_trait(?Send)]
pub trait LarekApi {
    /// Whole catalog, images already pointing at the CDN.
    async fn get_product_list(&self) -> ApiResult<Vec<Product>>;

    /// One product by id.
    async fn get_product_item(&self, id: &str) -> ApiResult<Product>;

    /// Places an order.
    async fn order_products(&self, order: &OrderRequest) -> ApiResult<OrderResult>;
}

/// HTTP implementation of [`LarekApi`].
#[derive(Debug, Clone)]
pub struct AppApi {
    cdn: String,
    api: Api,
}

impl AppApi {
    pub fn new(cdn: impl Into<String>, base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(AppApi {
            cdn: cdn.into().trim_end_matches('/').to_string(),
            api: Api::new(base_url)?,
        })
    }

    pub fn cdn(&self) -> &str {
        &self.cdn
    }

    fn with_cdn_image(&self, mut product: Product) -> Product {
        product.image = format!("{}{}", self.cdn, product.image);
        product
    }
}

#[async_trait(?Send)]
impl LarekApi for AppApi {
    async fn get_product_list(&self) -> ApiResult<Vec<Product>> {
        let list: ApiListResponse<Product> = self.api.get("/product/").await?;
        info!(total = list.total, received = list.items.len(), "Catalog fetched");
        Ok(list
            .items
            .into_iter()
            .map(|p| self.with_cdn_image(p))
            .collect())
    }

    async fn get_product_item(&self, id: &str) -> ApiResult<Product> {
        let product: Product = self.api.get_segments(&["product", id]).await?;
        Ok(self.with_cdn_image(product))
    }

    async fn order_products(&self, order: &OrderRequest) -> ApiResult<OrderResult> {
        let result: OrderResult = self.api.post("/order", order).await?;
        info!(order_id = %result.id, "Order placed");
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
