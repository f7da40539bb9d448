//! Render View Models
//!
//! Display-ready values handed to render targets. Text fields hold raw,
//! unescaped text; each target escapes for its own medium.

use std::time::Duration;

/// One product card in the listing grid
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub category: String,
    /// Description cut to 100 characters, with `...` appended when cut
    pub excerpt: String,
    pub price: String,
    pub rating: f64,
    /// Five glyphs, filled up to the floored rating
    pub stars: String,
    /// Resolved image URL, loaded lazily by targets that support it
    pub image: String,
}

/// The full product shown in the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub rating: f64,
    pub stars: String,
    pub image: String,
}

/// A single pagination link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub page: u32,
    pub active: bool,
}

/// One row of the cart drawer
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub qty: u32,
    pub line_total: String,
}

/// Severity of a toast notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// A transient notice that dismisses itself after `duration`
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
    pub level: ToastLevel,
}

impl Toast {
    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
            level: ToastLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
            level: ToastLevel::Error,
        }
    }
}

/// Formats an amount as a dollar price with two decimals
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}
