//! Shopping Cart Module
//!
//! This module contains the cart side of the storefront client, including:
//! - Rendering helpers (drawer rows, empty state)
//! - `CartClient`, which mutates the server cart and re-fetches it

pub mod helpers;
pub mod state;

// Re-export commonly used types for convenience
pub use state::CartClient;
