//! Storefront Client Library
//!
//! This library drives a storefront page against its JSON API: a catalog
//! listing with filters, sorting and pagination, and a server-side session
//! cart shown in a drawer. Rendering goes through small traits, so the same
//! logic runs against the in-memory HTML targets or a terminal.

// Domain modules
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod lazy;
pub mod render;
pub mod router;
pub mod sequence;

pub use config::ClientConfig;
pub use error::{Result, StorefrontError};
pub use router::{create_storefront, Storefront, UiEvent};
