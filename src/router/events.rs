//! UI events the storefront page reacts to

/// A discrete user interaction with the storefront page
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search box changed; debounced before it reaches the catalog
    SearchInput(String),

    /// A category button was clicked; empty means all categories
    CategorySelected(String),

    /// The price filter was applied with the raw contents of both boxes
    PriceApplied { min: String, max: String },

    /// The sort select changed
    SortChanged(String),

    /// A pagination link was clicked
    PageSelected(u32),

    /// "View" on a product card
    ViewDetail(u64),

    /// "Add to Cart" on a product card
    AddToCart(u64),

    /// "Add to Cart" inside the product detail view
    AddFromDetail(u64),

    /// "Remove" on a cart drawer row
    RemoveFromCart(u64),

    /// The cart button in the header
    OpenCart,
}
