//! Storefront Wire Models
//!
//! JSON shapes returned by the storefront endpoints. The server owns all of
//! this data; the client only reads it. Fields the server may send as `null`
//! or leave out are modelled as `Option` or defaulted.

use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Models
// =============================================================================

/// A product as listed by `/api/products` and `/api/products/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Unit price in the store currency
    #[serde(default)]
    pub price: f64,

    /// Average rating between 0 and 5
    #[serde(default)]
    pub rating: Option<f64>,

    /// Absolute URL, rooted static path or bare filename
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,
}

fn first_page() -> u32 {
    1
}

/// One page of a filtered product listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,

    /// Page the server actually returned
    #[serde(default = "first_page")]
    pub page: u32,

    /// Total number of pages for the current filters
    #[serde(default)]
    pub pages: u32,

    /// Total number of matching products, when the server reports it
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub per_page: Option<u32>,
}

// =============================================================================
// Cart Models
// =============================================================================

/// A line of the session cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: u64,

    pub title: String,

    /// Unit price
    pub price: f64,

    pub qty: u32,

    /// Line total as computed by the server
    pub subtotal: f64,

    #[serde(default)]
    pub image: Option<String>,
}

/// Full cart contents as returned by `/api/cart`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub total: f64,

    /// Sum of all quantities
    #[serde(default)]
    pub count: u32,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Response to `/cart/add`, `/api/cart/add` and `/cart/update`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MutationResponse {
    /// Explicit business outcome; absent on bare `{}` acknowledgements
    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub error: Option<String>,

    /// Cart after the mutation, when the server includes it
    #[serde(default)]
    pub cart: Option<CartSummary>,
}
