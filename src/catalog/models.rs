//! Catalog Query Models
//!
//! The listing query the client keeps in memory, and partial updates to it.

use super::helpers::parse_price_bound;

// =============================================================================
// Sort Order
// =============================================================================

/// Listing order understood by `/api/products`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Server default (newest first); not sent
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Parses a sort control value; anything unrecognised means default order
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price_asc" => SortOrder::PriceAsc,
            "price_desc" => SortOrder::PriceDesc,
            _ => SortOrder::Default,
        }
    }

    /// Query parameter value, `None` for the default order
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortOrder::Default => None,
            SortOrder::PriceAsc => Some("price_asc"),
            SortOrder::PriceDesc => Some("price_desc"),
        }
    }
}

// =============================================================================
// Query State
// =============================================================================

/// Filters, sort and page of the current listing.
///
/// Held in memory only. Any filter or sort change sends the query back to
/// page 1; a page change leaves the filters alone.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// Free-text search, already trimmed
    pub text: String,
    pub category: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub sort: SortOrder,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            text: String::new(),
            category: String::new(),
            price_min: None,
            price_max: None,
            page: 1,
            page_size,
            sort: SortOrder::Default,
        }
    }

    /// Merges `update` into the state and resets to the first page
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(min) = update.price_min {
            self.price_min = min;
        }
        if let Some(max) = update.price_max {
            self.price_max = max;
        }
        if let Some(sort) = update.sort {
            self.sort = sort;
        }
        self.page = 1;
    }

    /// Moves to `page`, clamped to at least 1
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// A partial change to the listing filters.
///
/// `None` leaves a field untouched. For the price bounds, `Some(None)`
/// clears the bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub text: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<Option<f64>>,
    pub price_max: Option<Option<f64>>,
    pub sort: Option<SortOrder>,
}

impl FilterUpdate {
    /// New search text; surrounding whitespace is dropped
    pub fn text(text: impl AsRef<str>) -> Self {
        Self {
            text: Some(text.as_ref().trim().to_string()),
            ..Self::default()
        }
    }

    /// Selects a category; an empty string means all categories
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Price bounds as typed by the user.
    ///
    /// Blank, unparseable or negative input means "no bound".
    pub fn price_range(min: &str, max: &str) -> Self {
        Self {
            price_min: Some(parse_price_bound(min)),
            price_max: Some(parse_price_bound(max)),
            ..Self::default()
        }
    }

    pub fn sort(sort: SortOrder) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }
}
