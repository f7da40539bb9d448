//! Catalog Module
//!
//! This module contains the product listing side of the storefront client:
//! - Query state and partial filter updates
//! - Parameter building and card presentation helpers
//! - `CatalogClient`, the query state machine

pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use models::{FilterUpdate, QueryState, SortOrder};
pub use state::{CatalogClient, QueryOutcome};
