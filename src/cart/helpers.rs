//! Shopping Cart Rendering Helpers
//!
//! This module turns the server's cart summary into drawer rows and pushes
//! it into a [`CartView`].

use crate::api::models::{CartItem, CartSummary};
use crate::catalog::helpers::resolve_image;
use crate::config::ClientConfig;
use crate::render::models::{format_price, CartRow};
use crate::render::CartView;

/// Drawer message for an empty or unavailable cart
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Builds the drawer row for one cart line.
///
/// The line total is the server's `subtotal`; it is never recomputed here.
pub fn cart_row(item: &CartItem, config: &ClientConfig) -> CartRow {
    CartRow {
        id: item.id,
        title: item.title.clone(),
        image: resolve_image(item.image.as_deref(), config),
        unit_price: format_price(item.price),
        qty: item.qty,
        line_total: format_price(item.subtotal),
    }
}

/// Renders a cart summary, or the empty state when there is nothing to show.
///
/// An empty cart always shows `$0.00` and `0`, whatever totals the server
/// sent alongside it.
pub fn render_summary<V: CartView + ?Sized>(
    view: &mut V,
    cart: Option<&CartSummary>,
    config: &ClientConfig,
) {
    render_drawer(view, cart, config);
    view.set_count(&count_label(cart));
}

/// Renders the drawer rows and total, leaving the count badge alone
pub fn render_drawer<V: CartView + ?Sized>(
    view: &mut V,
    cart: Option<&CartSummary>,
    config: &ClientConfig,
) {
    match cart {
        Some(cart) if !cart.is_empty() => {
            let rows: Vec<CartRow> = cart
                .items
                .iter()
                .map(|item| cart_row(item, config))
                .collect();
            view.render_items(&rows);
            view.set_total(&format_price(cart.total));
        }
        _ => {
            view.render_empty(EMPTY_CART_MESSAGE);
            view.set_total(&format_price(0.0));
        }
    }
}

/// Text of the count badge; `0` for an empty or unavailable cart
pub fn count_label(cart: Option<&CartSummary>) -> String {
    match cart {
        Some(cart) if !cart.is_empty() => cart.count.to_string(),
        _ => "0".to_string(),
    }
}
