//! Client Configuration
//!
//! Constants the storefront page hard-codes, gathered into one struct so
//! tests and the binary can override them.

use std::time::Duration;

// =============================================================================
// Defaults
// =============================================================================

/// Base URL used when `STOREFRONT_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Products per listing page
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Quiet period before a search keystroke triggers a query
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);
/// How far ahead of the viewport lazy images start loading, in pixels
pub const DEFAULT_LAZY_MARGIN: f64 = 200.0;
/// Directory bare image filenames are served from
pub const DEFAULT_IMAGE_DIR: &str = "/static/images/";
/// Image shown when a product has none
pub const DEFAULT_FALLBACK_IMAGE: &str = "a1.jpg";

/// How long each kind of toast stays on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ToastDurations {
    pub added: Duration,
    pub add_failed: Duration,
    pub network_failed: Duration,
    pub removed: Duration,
    pub remove_failed: Duration,
    pub detail_add_failed: Duration,
}

impl Default for ToastDurations {
    fn default() -> Self {
        Self {
            added: Duration::from_millis(1200),
            add_failed: Duration::from_millis(1400),
            network_failed: Duration::from_millis(1400),
            removed: Duration::from_millis(900),
            remove_failed: Duration::from_millis(1200),
            detail_add_failed: Duration::from_millis(1000),
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Settings shared by the catalog and cart clients
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Origin of the storefront, without a trailing slash
    pub base_url: String,

    /// Number of products requested per page
    pub page_size: u32,

    /// Debounce window for search text input
    pub debounce: Duration,

    /// Lookahead margin for lazy image loading
    pub lazy_margin: f64,

    /// Prefix applied to bare image filenames
    pub image_dir: String,

    /// Filename used when a product or cart item has no image
    pub fallback_image: String,

    pub toasts: ToastDurations,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            lazy_margin: DEFAULT_LAZY_MARGIN,
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            toasts: ToastDurations::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Reads overrides from the environment on top of the defaults.
    ///
    /// Unparseable numeric values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STOREFRONT_BASE_URL") {
            config.base_url = normalize_base_url(url);
        }

        if let Ok(raw) = std::env::var("STOREFRONT_PAGE_SIZE") {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => tracing::warn!("ignoring invalid STOREFRONT_PAGE_SIZE={:?}", raw),
            }
        }

        if let Ok(raw) = std::env::var("STOREFRONT_DEBOUNCE_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.debounce = Duration::from_millis(ms),
                Err(_) => tracing::warn!("ignoring invalid STOREFRONT_DEBOUNCE_MS={:?}", raw),
            }
        }

        config
    }

    /// Joins an API path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
