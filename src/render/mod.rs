//! Render Targets
//!
//! The catalog and cart clients never touch a document directly. They push
//! view models into these traits, so the same logic drives the in-memory
//! HTML targets used in tests and the terminal target used by the binary.

pub mod html;
pub mod models;
pub mod terminal;

pub use html::{escape_html, HtmlCartView, HtmlCatalogView, ToastStack};
pub use models::{format_price, CartRow, PageLink, ProductCard, ProductDetail, Toast, ToastLevel};
pub use terminal::TerminalView;

/// Where the catalog client renders the product grid and its controls.
///
/// Every call replaces the previous content of the element it targets.
pub trait CatalogView: Send {
    /// Replaces the grid with one card per product
    fn render_products(&mut self, cards: &[ProductCard]);

    /// Replaces the grid with a single empty-state message
    fn render_empty(&mut self, message: &str);

    /// Replaces the pagination controls; an empty slice clears them
    fn render_pagination(&mut self, links: &[PageLink]);

    /// Updates the result-count label
    fn set_result_info(&mut self, info: &str);

    /// Marks the category control matching `category` as active
    fn set_active_category(&mut self, _category: &str) {}

    /// Shows the detail view for one product
    fn show_detail(&mut self, detail: &ProductDetail);
}

/// Where the cart client renders the cart drawer and the header count
pub trait CartView: Send {
    fn render_items(&mut self, rows: &[CartRow]);

    fn render_empty(&mut self, message: &str);

    fn set_total(&mut self, total: &str);

    fn set_count(&mut self, count: &str);

    /// Reveals the cart drawer
    fn open_drawer(&mut self);
}

/// Shows transient notices to the user
pub trait Notifier: Send {
    fn notify(&mut self, toast: Toast);
}
