//! In-memory HTML render targets
//!
//! These targets keep the markup the storefront page would contain for the
//! grid, pagination, detail view and cart drawer. Every interpolated text
//! field goes through [`escape_html`], so product data can never inject
//! markup.

use super::models::{CartRow, PageLink, ProductCard, ProductDetail, Toast};
use super::{CartView, CatalogView, Notifier};
use crate::lazy::{DeferredImage, Intersection, LazyImages, Promotion, Viewport};
use tokio::time::Instant;

/// Escapes `&`, `<` and `>` so text is inserted literally
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes text for use inside a double-quoted attribute value
pub fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

// =============================================================================
// Catalog
// =============================================================================

/// Columns in the product grid
const GRID_COLUMNS: usize = 3;
/// Height of one grid row, used to place cards for lazy loading
const GRID_ROW_HEIGHT: f64 = 420.0;

#[derive(Debug, Clone, PartialEq)]
enum GridNode {
    Card {
        card: ProductCard,
        /// Real image source once the lazy loader promoted it
        loaded: Option<String>,
    },
    Empty(String),
}

/// HTML target for the product grid, pagination, result label and detail view
#[derive(Debug, Clone)]
pub struct HtmlCatalogView {
    grid: Vec<GridNode>,
    pagination: Vec<PageLink>,
    result_info: String,
    active_category: String,
    detail: Option<ProductDetail>,
    images: LazyImages<u64>,
    viewport: Viewport,
}

impl Default for HtmlCatalogView {
    fn default() -> Self {
        Self::new(
            Intersection::Supported {
                root_margin: crate::config::DEFAULT_LAZY_MARGIN,
            },
            Viewport::new(0.0, 800.0),
        )
    }
}

impl HtmlCatalogView {
    pub fn new(intersection: Intersection, viewport: Viewport) -> Self {
        Self {
            grid: Vec::new(),
            pagination: Vec::new(),
            result_info: String::new(),
            active_category: String::new(),
            detail: None,
            images: LazyImages::new(intersection),
            viewport,
        }
    }

    /// Moves the viewport and loads any images that came into range
    pub fn scroll_to(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let promotions = self.images.update(viewport);
        self.apply(promotions);
    }

    fn apply(&mut self, promotions: Vec<Promotion<u64>>) {
        for promotion in promotions {
            for node in self.grid.iter_mut() {
                if let GridNode::Card { card, loaded } = node {
                    if card.id == promotion.key {
                        *loaded = Some(promotion.src.clone());
                    }
                }
            }
        }
    }

    /// Number of top-level nodes in the grid
    pub fn node_count(&self) -> usize {
        self.grid.len()
    }

    pub fn card_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|node| matches!(node, GridNode::Card { .. }))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|node| matches!(node, GridNode::Empty(_)))
            .count()
    }

    /// Number of card images still waiting to load
    pub fn pending_images(&self) -> usize {
        self.images.pending()
    }

    /// The real source of a card image, if it has been loaded
    pub fn loaded_image(&self, product_id: u64) -> Option<&str> {
        self.grid.iter().find_map(|node| match node {
            GridNode::Card { card, loaded } if card.id == product_id => loaded.as_deref(),
            _ => None,
        })
    }

    pub fn pagination(&self) -> &[PageLink] {
        &self.pagination
    }

    pub fn result_info(&self) -> &str {
        &self.result_info
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        self.detail.as_ref()
    }

    /// Markup of the product grid
    pub fn grid_html(&self) -> String {
        self.grid
            .iter()
            .map(|node| match node {
                GridNode::Card { card, loaded } => card_html(card, loaded.as_deref()),
                GridNode::Empty(message) => format!(
                    r#"<div class="col-12"><p class="text-muted">{}</p></div>"#,
                    escape_html(message)
                ),
            })
            .collect()
    }

    /// Markup of the pagination list
    pub fn pagination_html(&self) -> String {
        self.pagination
            .iter()
            .map(|link| {
                let class = if link.active {
                    "page-item active"
                } else {
                    "page-item"
                };
                format!(
                    r##"<li class="{}"><a class="page-link" href="#" data-page="{}">{}</a></li>"##,
                    class, link.page, link.page
                )
            })
            .collect()
    }

    /// Markup of the detail view, if one is shown
    pub fn detail_html(&self) -> Option<String> {
        self.detail.as_ref().map(detail_html)
    }
}

fn card_html(card: &ProductCard, loaded: Option<&str>) -> String {
    let source = match loaded {
        Some(src) => format!(r#"src="{}""#, escape_attr(src)),
        None => format!(r#"data-src="{}" loading="lazy""#, escape_attr(&card.image)),
    };

    format!(
        concat!(
            r#"<div class="col-md-4"><div class="card product-card h-100">"#,
            r#"<img {source} class="card-img-top lazy-img" alt="{alt}">"#,
            r#"<div class="card-body d-flex flex-column">"#,
            r#"<div class="mb-2"><div class="product-title">{title}</div>"#,
            r#"<div class="product-meta">{category}</div></div>"#,
            r#"<p class="small text-muted mb-3">{excerpt}</p>"#,
            r#"<div class="mt-auto d-flex justify-content-between align-items-center">"#,
            r#"<div><div class="price">{price}</div>"#,
            r#"<div class="small text-muted">{stars} <span class="ms-1">({rating})</span></div></div>"#,
            r#"<div><button class="btn btn-sm btn-outline-secondary me-2 view-detail" data-id="{id}">View</button>"#,
            r#"<button class="btn btn-sm btn-dark add-to-cart" data-id="{id}">Add to Cart</button></div>"#,
            r#"</div></div></div></div>"#,
        ),
        source = source,
        alt = escape_attr(&card.title),
        title = escape_html(&card.title),
        category = escape_html(&card.category),
        excerpt = escape_html(&card.excerpt),
        price = card.price,
        stars = card.stars,
        rating = card.rating,
        id = card.id,
    )
}

fn detail_html(detail: &ProductDetail) -> String {
    format!(
        concat!(
            r#"<div class="row"><div class="col-md-6">"#,
            r#"<img src="{image}" class="img-fluid" alt="{alt}" /></div>"#,
            r#"<div class="col-md-6"><h4>{title}</h4>"#,
            r#"<p class="text-muted">{category}</p><h3>{price}</h3>"#,
            r#"<p>{description}</p>"#,
            r#"<div class="mb-2">{stars} <span class="ms-2">({rating})</span></div>"#,
            r#"<button class="btn btn-dark" id="modalAddCart" data-id="{id}">Add to Cart</button>"#,
            r#"</div></div>"#,
        ),
        image = escape_attr(&detail.image),
        alt = escape_attr(&detail.title),
        title = escape_html(&detail.title),
        category = escape_html(&detail.category),
        price = detail.price,
        description = escape_html(&detail.description),
        stars = detail.stars,
        rating = detail.rating,
        id = detail.id,
    )
}

impl CatalogView for HtmlCatalogView {
    fn render_products(&mut self, cards: &[ProductCard]) {
        self.grid.clear();
        self.images.clear();

        let mut immediate = Vec::new();
        for (index, card) in cards.iter().enumerate() {
            let row = (index / GRID_COLUMNS) as f64;
            let deferred = DeferredImage {
                key: card.id,
                src: card.image.clone(),
                top: row * GRID_ROW_HEIGHT,
                height: GRID_ROW_HEIGHT,
            };
            if let Some(promotion) = self.images.observe(deferred) {
                immediate.push(promotion);
            }
            self.grid.push(GridNode::Card {
                card: card.clone(),
                loaded: None,
            });
        }

        self.apply(immediate);
        let visible = self.images.update(self.viewport);
        self.apply(visible);
    }

    fn render_empty(&mut self, message: &str) {
        self.grid.clear();
        self.images.clear();
        self.grid.push(GridNode::Empty(message.to_string()));
    }

    fn render_pagination(&mut self, links: &[PageLink]) {
        self.pagination = links.to_vec();
    }

    fn set_result_info(&mut self, info: &str) {
        self.result_info = info.to_string();
    }

    fn set_active_category(&mut self, category: &str) {
        self.active_category = category.to_string();
    }

    fn show_detail(&mut self, detail: &ProductDetail) {
        self.detail = Some(detail.clone());
    }
}

// =============================================================================
// Cart
// =============================================================================

/// HTML target for the cart drawer and the header count badge
#[derive(Debug, Clone, Default)]
pub struct HtmlCartView {
    rows: Vec<CartRow>,
    empty: Option<String>,
    total: String,
    count: String,
    drawer_open: bool,
}

impl HtmlCartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn count(&self) -> &str {
        &self.count
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Markup of the drawer body
    pub fn items_html(&self) -> String {
        if let Some(message) = &self.empty {
            return format!(r#"<p class="text-muted">{}</p>"#, escape_html(message));
        }

        self.rows
            .iter()
            .map(|row| {
                format!(
                    concat!(
                        r#"<div class="d-flex align-items-center mb-3">"#,
                        r#"<img src="{image}" class="cart-thumb">"#,
                        r#"<div style="flex:1"><div class="small fw-semibold">{title}</div>"#,
                        r#"<div class="small text-muted">{unit} x {qty} = <strong>{line}</strong></div></div>"#,
                        r#"<div><button class="btn btn-sm btn-outline-danger drawer-remove" data-id="{id}">Remove</button></div>"#,
                        r#"</div>"#,
                    ),
                    image = escape_attr(&row.image),
                    title = escape_html(&row.title),
                    unit = row.unit_price,
                    qty = row.qty,
                    line = row.line_total,
                    id = row.id,
                )
            })
            .collect()
    }
}

impl CartView for HtmlCartView {
    fn render_items(&mut self, rows: &[CartRow]) {
        self.empty = None;
        self.rows = rows.to_vec();
    }

    fn render_empty(&mut self, message: &str) {
        self.rows.clear();
        self.empty = Some(message.to_string());
    }

    fn set_total(&mut self, total: &str) {
        self.total = total.to_string();
    }

    fn set_count(&mut self, count: &str) {
        self.count = count.to_string();
    }

    fn open_drawer(&mut self) {
        self.drawer_open = true;
    }
}

// =============================================================================
// Toasts
// =============================================================================

/// Toasts kept for [`ToastStack::history`]; older ones are forgotten
pub const TOAST_HISTORY_LIMIT: usize = 32;

/// Toast container that drops each notice once its duration has elapsed
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    shown: Vec<(Toast, Instant)>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toasts still on screen right now
    pub fn visible(&self) -> Vec<&Toast> {
        let now = Instant::now();
        self.shown
            .iter()
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(toast, _)| toast)
            .collect()
    }

    /// The most recent toasts, including dismissed ones, oldest first
    pub fn history(&self) -> Vec<&Toast> {
        self.shown.iter().map(|(toast, _)| toast).collect()
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, toast: Toast) {
        if self.shown.len() >= TOAST_HISTORY_LIMIT {
            let excess = self.shown.len() + 1 - TOAST_HISTORY_LIMIT;
            self.shown.drain(..excess);
        }
        let expires_at = Instant::now() + toast.duration;
        self.shown.push((toast, expires_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::models::ToastLevel;
    use std::time::Duration;

    fn card(id: u64, title: &str) -> ProductCard {
        ProductCard {
            id,
            title: title.to_string(),
            category: "Kitchen".to_string(),
            excerpt: "A sturdy mug".to_string(),
            price: "$4.50".to_string(),
            rating: 4.2,
            stars: "★★★★☆".to_string(),
            image: format!("/static/images/{}.jpg", id),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & co</script>"),
            "&lt;script&gt;alert('x') &amp; co&lt;/script&gt;"
        );
        assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn test_script_title_renders_as_text() {
        let mut view = HtmlCatalogView::default();
        view.render_products(&[card(1, "<script>alert(1)</script>")]);

        let html = view.grid_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_empty_replaces_cards() {
        let mut view = HtmlCatalogView::default();
        view.render_products(&[card(1, "Mug"), card(2, "Plate")]);
        assert_eq!(view.card_count(), 2);

        view.render_empty("No products found.");
        assert_eq!(view.node_count(), 1);
        assert_eq!(view.empty_count(), 1);
        assert_eq!(view.card_count(), 0);
    }

    #[test]
    fn test_only_cards_near_viewport_load() {
        let mut view = HtmlCatalogView::new(
            Intersection::Supported { root_margin: 200.0 },
            Viewport::new(0.0, 400.0),
        );
        let cards: Vec<ProductCard> = (1..=9).map(|id| card(id, "Item")).collect();
        view.render_products(&cards);

        // Rows start at 0, 420 and 840; the viewport reaches 600 with lookahead.
        assert_eq!(view.loaded_image(1), Some("/static/images/1.jpg"));
        assert_eq!(view.loaded_image(4), Some("/static/images/4.jpg"));
        assert_eq!(view.loaded_image(7), None);
        assert_eq!(view.pending_images(), 3);
        assert!(view.grid_html().contains(r#"data-src="/static/images/7.jpg""#));

        view.scroll_to(Viewport::new(500.0, 400.0));
        assert_eq!(view.loaded_image(7), Some("/static/images/7.jpg"));
        assert_eq!(view.pending_images(), 0);
    }

    #[test]
    fn test_unsupported_intersection_loads_everything() {
        let mut view = HtmlCatalogView::new(Intersection::Unsupported, Viewport::new(0.0, 10.0));
        let cards: Vec<ProductCard> = (1..=9).map(|id| card(id, "Item")).collect();
        view.render_products(&cards);
        assert!((1..=9).all(|id| view.loaded_image(id).is_some()));
    }

    #[test]
    fn test_pagination_marks_active_page() {
        let mut view = HtmlCatalogView::default();
        view.render_pagination(&[
            PageLink { page: 1, active: false },
            PageLink { page: 2, active: true },
        ]);
        let html = view.pagination_html();
        assert!(html.contains(
            r##"<li class="page-item active"><a class="page-link" href="#" data-page="2">2</a></li>"##
        ));
        assert_eq!(html.matches("page-link").count(), 2);
    }

    #[test]
    fn test_cart_empty_message_replaces_rows() {
        let mut view = HtmlCartView::new();
        view.render_items(&[CartRow {
            id: 5,
            title: "Fish & Chips".into(),
            image: "/static/images/a1.jpg".into(),
            unit_price: "$2.00".into(),
            qty: 2,
            line_total: "$4.00".into(),
        }]);
        assert!(view.items_html().contains("Fish &amp; Chips"));

        view.render_empty("Your cart is empty.");
        assert!(view.rows().is_empty());
        assert_eq!(view.items_html(), r#"<p class="text-muted">Your cart is empty.</p>"#);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_dismiss_after_duration() {
        let mut toasts = ToastStack::new();
        toasts.notify(Toast::info("Added to cart", Duration::from_millis(1200)));
        toasts.notify(Toast::error("Network error", Duration::from_millis(1400)));
        assert_eq!(toasts.visible().len(), 2);

        tokio::time::advance(Duration::from_millis(1300)).await;
        let visible = toasts.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].level, ToastLevel::Error);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(toasts.visible().is_empty());
        assert_eq!(toasts.history().len(), 2);
    }

    #[test]
    fn test_toast_history_is_capped() {
        let mut toasts = ToastStack::new();
        for n in 0..TOAST_HISTORY_LIMIT + 8 {
            toasts.notify(Toast::info(format!("toast {}", n), Duration::from_secs(60)));
        }

        let history = toasts.history();
        assert_eq!(history.len(), TOAST_HISTORY_LIMIT);
        assert_eq!(history[0].message, "toast 8");
        assert_eq!(
            history[TOAST_HISTORY_LIMIT - 1].message,
            format!("toast {}", TOAST_HISTORY_LIMIT + 7)
        );
    }
}
