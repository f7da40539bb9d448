//! Catalog Helpers
//!
//! Pure functions behind the listing: query parameter building, user input
//! parsing and the presentation rules for product cards.

use super::models::QueryState;
use crate::api::models::{Product, ProductPage};
use crate::config::ClientConfig;
use crate::render::models::{format_price, PageLink, ProductCard, ProductDetail};

/// Characters of description shown on a product card
pub const EXCERPT_LENGTH: usize = 100;
/// Number of glyphs in a star rating
pub const MAX_STARS: usize = 5;
/// Prefix of paths the server already serves as static files
const STATIC_ROOT: &str = "/static/";

// =============================================================================
// Query Building
// =============================================================================

/// Serializes the query state into `/api/products` parameters.
///
/// Empty text, empty category, absent price bounds and the default sort are
/// left out. `page` and `per_page` are always present.
pub fn query_params(state: &QueryState) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if !state.text.is_empty() {
        params.push(("q", state.text.clone()));
    }
    if !state.category.is_empty() {
        params.push(("category", state.category.clone()));
    }
    if let Some(min) = state.price_min {
        params.push(("price_min", min.to_string()));
    }
    if let Some(max) = state.price_max {
        params.push(("price_max", max.to_string()));
    }
    if let Some(sort) = state.sort.as_param() {
        params.push(("sort", sort.to_string()));
    }

    params.push(("page", state.page.to_string()));
    params.push(("per_page", state.page_size.to_string()));
    params
}

/// Parses a price bound typed by the user.
///
/// Returns `None` ("no bound") for blank, unparseable, negative or
/// non-finite input.
pub fn parse_price_bound(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

// =============================================================================
// Presentation
// =============================================================================

/// Cuts a description to [`EXCERPT_LENGTH`] characters, marking the cut with `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= EXCERPT_LENGTH {
        return description.to_string();
    }
    let mut excerpt: String = description.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

/// Five star glyphs, filled up to the floored rating
pub fn render_stars(rating: f64) -> String {
    let full = if rating.is_finite() {
        rating.floor().clamp(0.0, MAX_STARS as f64) as usize
    } else {
        0
    };
    (0..MAX_STARS)
        .map(|i| if i < full { '★' } else { '☆' })
        .collect()
}

/// Resolves a product or cart image reference to a URL.
///
/// Absolute URLs and paths already under `/static/` are used as they are.
/// Bare filenames are served from the configured image directory, and a
/// missing image falls back to the default one.
pub fn resolve_image(image: Option<&str>, config: &ClientConfig) -> String {
    let image = image.map(str::trim).unwrap_or_default();
    if image.is_empty() {
        return format!("{}{}", config.image_dir, config.fallback_image);
    }
    if is_absolute_url(image) || image.starts_with(STATIC_ROOT) {
        return image.to_string();
    }
    format!("{}{}", config.image_dir, image)
}

fn is_absolute_url(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://") || image.starts_with("//")
}

/// Builds the grid card for one listed product
pub fn product_card(product: &Product, config: &ClientConfig) -> ProductCard {
    let rating = product.rating.unwrap_or(0.0);
    ProductCard {
        id: product.id,
        title: product.title.clone(),
        category: product.category.clone().unwrap_or_default(),
        excerpt: truncate_description(product.description.as_deref().unwrap_or_default()),
        price: format_price(product.price),
        rating,
        stars: render_stars(rating),
        image: resolve_image(product.image.as_deref(), config),
    }
}

/// Builds the detail view for one product; the description is not cut
pub fn product_detail(product: &Product, config: &ClientConfig) -> ProductDetail {
    let rating = product.rating.unwrap_or(0.0);
    ProductDetail {
        id: product.id,
        title: product.title.clone(),
        category: product.category.clone().unwrap_or_default(),
        description: product.description.clone().unwrap_or_default(),
        price: format_price(product.price),
        rating,
        stars: render_stars(rating),
        image: resolve_image(product.image.as_deref(), config),
    }
}

/// One link per page, or none at all when there is at most one page
pub fn page_links(page: u32, pages: u32) -> Vec<PageLink> {
    if pages <= 1 {
        return Vec::new();
    }
    (1..=pages)
        .map(|n| PageLink {
            page: n,
            active: n == page,
        })
        .collect()
}

/// Result-count label for a listing page
pub fn result_info(listing: &ProductPage) -> String {
    let shown = listing.products.len();
    let total = listing
        .total
        .filter(|total| *total > 0)
        .unwrap_or(shown as u64);
    format!("Showing {} / {}", shown, total)
}
