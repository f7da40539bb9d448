//! HTTP client for the storefront REST API
//!
//! All calls are same-origin style: one `reqwest::Client` with a cookie jar,
//! so the session cookie issued by the first response rides along on every
//! later request. GETs carry their parameters in the query string and
//! mutations are form-encoded, matching what the storefront accepts.

use super::models::{CartSummary, MutationResponse, Product, ProductPage};
use crate::config::ClientConfig;
use crate::error::{Result, StorefrontError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Which add-to-cart route a mutation goes through.
///
/// The listing grid posts to `/cart/add`; the product detail view uses the
/// `/api/cart/add` alias. Both behave identically on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEndpoint {
    Cart,
    Api,
}

impl AddEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            AddEndpoint::Cart => "/cart/add",
            AddEndpoint::Api => "/api/cart/add",
        }
    }
}

/// Client for the storefront endpoints.
///
/// Cloning is cheap and clones share the same connection pool and cookie
/// jar, which is how the catalog and cart clients end up in one session.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Builds a client with a cookie store for the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `/api/products` with the given query parameters
    pub async fn list_products(&self, params: &[(&'static str, String)]) -> Result<ProductPage> {
        let path = "/api/products";
        tracing::debug!("GET {} {:?}", path, params);
        let response = self
            .client
            .get(self.config.url(path))
            .query(params)
            .send()
            .await?;
        decode(path, response).await
    }

    /// GET `/api/products/{id}`
    pub async fn product(&self, id: u64) -> Result<Product> {
        let path = format!("/api/products/{}", id);
        tracing::debug!("GET {}", path);
        let response = self.client.get(self.config.url(&path)).send().await?;
        decode(&path, response).await
    }

    /// GET `/api/cart`
    pub async fn cart(&self) -> Result<CartSummary> {
        let path = "/api/cart";
        tracing::debug!("GET {}", path);
        let response = self.client.get(self.config.url(path)).send().await?;
        decode(path, response).await
    }

    /// POSTs an add-to-cart mutation.
    ///
    /// Only an explicit `success: true` counts as success; anything else is
    /// reported as [`StorefrontError::Rejected`].
    pub async fn add_to_cart(
        &self,
        endpoint: AddEndpoint,
        product_id: u64,
        qty: u32,
    ) -> Result<MutationResponse> {
        let outcome = self.post_quantity(endpoint.path(), product_id, qty).await?;
        match outcome.success {
            Some(true) => Ok(outcome),
            _ => Err(StorefrontError::Rejected(
                outcome
                    .error
                    .unwrap_or_else(|| "add to cart was not confirmed".to_string()),
            )),
        }
    }

    /// POSTs `/cart/update`, setting the quantity of one line.
    ///
    /// A quantity of zero deletes the line. A bare `{}` acknowledgement is
    /// accepted; an explicit `success: false` is rejected.
    pub async fn update_cart(&self, product_id: u64, qty: u32) -> Result<MutationResponse> {
        let outcome = self.post_quantity("/cart/update", product_id, qty).await?;
        if outcome.success == Some(false) {
            return Err(StorefrontError::Rejected(
                outcome
                    .error
                    .unwrap_or_else(|| "cart update was refused".to_string()),
            ));
        }
        Ok(outcome)
    }

    async fn post_quantity(&self, path: &str, product_id: u64, qty: u32) -> Result<MutationResponse> {
        let form = [
            ("product_id", product_id.to_string()),
            ("qty", qty.to_string()),
        ];
        tracing::debug!("POST {} product_id={} qty={}", path, product_id, qty);
        let response = self
            .client
            .post(self.config.url(path))
            .form(&form)
            .send()
            .await?;
        decode(path, response).await
    }
}

/// Checks the status and parses the JSON body of a response
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(StorefrontError::Status {
            status,
            path: path.to_string(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
