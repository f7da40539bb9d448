//! Storefront API Module
//!
//! This module contains the HTTP side of the client:
//! - Wire models for the JSON the storefront returns
//! - `ApiClient`, a thin reqwest wrapper that carries the session cookie

pub mod client;
pub mod models;

// Re-export commonly used types for convenience
pub use client::{AddEndpoint, ApiClient};
pub use models::{CartItem, CartSummary, MutationResponse, Product, ProductPage};
