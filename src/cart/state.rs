//! Cart Sync Client
//!
//! The session cart lives on the server. This client never edits a local
//! copy: every mutation is posted and then followed by a full re-fetch, and
//! whatever the server returns is what gets rendered.

use super::helpers::{count_label, render_drawer, render_summary};
use crate::api::{AddEndpoint, ApiClient, CartSummary};
use crate::error::StorefrontError;
use crate::render::{CartView, Notifier, Toast};
use crate::sequence::RequestSequence;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

// =============================================================================
// Toast Messages
// =============================================================================

pub const ADDED_MESSAGE: &str = "Added to cart";
pub const ADD_FAILED_MESSAGE: &str = "Could not add to cart";
pub const NETWORK_FAILED_MESSAGE: &str = "Network error";
pub const REMOVED_MESSAGE: &str = "Removed from cart";
pub const REMOVE_FAILED_MESSAGE: &str = "Could not remove item";
pub const UPDATE_FAILED_MESSAGE: &str = "Could not update cart";

// =============================================================================
// Cart Client
// =============================================================================

/// Shared handle to the cart client.
///
/// Clones refer to the same view, notifier and request sequences. The
/// drawer contents and the count badge are sequenced separately, so a
/// count-only fetch never makes a pending drawer refresh look stale.
pub struct CartClient<V, N> {
    inner: Arc<Inner<V, N>>,
}

impl<V, N> Clone for CartClient<V, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<V, N> {
    api: ApiClient,
    view: Mutex<V>,
    notifier: Mutex<N>,
    drawer_sequence: RequestSequence,
    count_sequence: RequestSequence,
}

impl<V: CartView, N: Notifier> CartClient<V, N> {
    pub fn new(api: ApiClient, view: V, notifier: N) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view: Mutex::new(view),
                notifier: Mutex::new(notifier),
                drawer_sequence: RequestSequence::new(),
                count_sequence: RequestSequence::new(),
            }),
        }
    }

    /// Locks the cart render target
    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.inner.view.lock().await
    }

    /// Locks the notifier
    pub async fn notifier(&self) -> MutexGuard<'_, N> {
        self.inner.notifier.lock().await
    }

    /// GETs the cart; any failure is logged and yields `None`
    pub async fn fetch_cart(&self) -> Option<CartSummary> {
        match self.inner.api.cart().await {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!("could not fetch cart: {}", e);
                None
            }
        }
    }

    /// Renders `cart` into the drawer, or the empty state for `None`
    pub async fn render_cart(&self, cart: Option<&CartSummary>) {
        let mut view = self.inner.view.lock().await;
        render_summary(&mut *view, cart, self.inner.api.config());
    }

    /// Re-fetches and re-renders the drawer, optionally revealing it.
    ///
    /// A response older than one already rendered is dropped. The drawer
    /// and the count are checked independently.
    pub async fn refresh(&self, open: bool) {
        let drawer_ticket = self.inner.drawer_sequence.issue();
        let count_ticket = self.inner.count_sequence.issue();
        let cart = self.fetch_cart().await;

        let mut view = self.inner.view.lock().await;
        if self.inner.drawer_sequence.try_apply(drawer_ticket) {
            render_drawer(&mut *view, cart.as_ref(), self.inner.api.config());
        } else {
            tracing::debug!("dropping stale cart response #{}", drawer_ticket);
        }
        if self.inner.count_sequence.try_apply(count_ticket) {
            view.set_count(&count_label(cart.as_ref()));
        }

        if open {
            view.open_drawer();
        }
    }

    /// Refreshes the cart, then reveals the drawer
    pub async fn open_drawer(&self) {
        self.refresh(true).await;
    }

    /// Re-fetches the cart and updates only the item count
    pub async fn refresh_count(&self) {
        let ticket = self.inner.count_sequence.issue();
        let cart = match self.inner.api.cart().await {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!("could not refresh cart count: {}", e);
                return;
            }
        };

        let mut view = self.inner.view.lock().await;
        if self.inner.count_sequence.try_apply(ticket) {
            view.set_count(&count_label(Some(&cart)));
        }
    }

    /// Adds `qty` of a product from the listing grid.
    ///
    /// On success shows a confirmation, refreshes the count and re-renders
    /// the drawer without opening it. Returns whether the server confirmed.
    pub async fn add_to_cart(&self, product_id: u64, qty: u32) -> bool {
        let toasts = self.inner.api.config().toasts.clone();

        match self
            .inner
            .api
            .add_to_cart(AddEndpoint::Cart, product_id, qty)
            .await
        {
            Ok(_) => {
                tracing::info!("added product {} x{} to cart", product_id, qty);
                self.notify(Toast::info(ADDED_MESSAGE, toasts.added)).await;
                self.refresh_count().await;
                self.refresh(false).await;
                true
            }
            Err(e) => {
                tracing::warn!("add to cart failed for product {}: {}", product_id, e);
                let (message, duration) = failure_notice(
                    &e,
                    ADD_FAILED_MESSAGE,
                    toasts.add_failed,
                    toasts.network_failed,
                );
                self.notify(Toast::error(message, duration)).await;
                false
            }
        }
    }

    /// Adds one unit from the product detail view via `/api/cart/add`.
    ///
    /// Returns `true` on success so the caller can close the detail view.
    pub async fn add_from_detail(&self, product_id: u64) -> bool {
        let toasts = self.inner.api.config().toasts.clone();

        match self
            .inner
            .api
            .add_to_cart(AddEndpoint::Api, product_id, 1)
            .await
        {
            Ok(_) => {
                tracing::info!("added product {} to cart from detail view", product_id);
                self.notify(Toast::info(ADDED_MESSAGE, toasts.added)).await;
                self.refresh_count().await;
                true
            }
            Err(e) => {
                tracing::warn!("add from detail failed for product {}: {}", product_id, e);
                let (message, duration) = failure_notice(
                    &e,
                    ADD_FAILED_MESSAGE,
                    toasts.detail_add_failed,
                    toasts.network_failed,
                );
                self.notify(Toast::error(message, duration)).await;
                false
            }
        }
    }

    /// Sets the quantity of one line; zero deletes it
    pub async fn update_quantity(&self, product_id: u64, qty: u32) -> bool {
        match self.inner.api.update_cart(product_id, qty).await {
            Ok(_) => {
                tracing::info!("set product {} quantity to {}", product_id, qty);
                self.refresh(false).await;
                true
            }
            Err(e) => {
                tracing::warn!("cart update failed for product {}: {}", product_id, e);
                let duration = self.inner.api.config().toasts.remove_failed;
                self.notify(Toast::error(UPDATE_FAILED_MESSAGE, duration)).await;
                false
            }
        }
    }

    /// Removes a line by posting quantity zero, then refreshes the drawer
    pub async fn remove_from_cart(&self, product_id: u64) -> bool {
        let toasts = self.inner.api.config().toasts.clone();

        match self.inner.api.update_cart(product_id, 0).await {
            Ok(_) => {
                tracing::info!("removed product {} from cart", product_id);
                self.refresh(false).await;
                self.notify(Toast::info(REMOVED_MESSAGE, toasts.removed)).await;
                true
            }
            Err(e) => {
                tracing::warn!("remove failed for product {}: {}", product_id, e);
                self.notify(Toast::error(REMOVE_FAILED_MESSAGE, toasts.remove_failed))
                    .await;
                false
            }
        }
    }

    async fn notify(&self, toast: Toast) {
        self.inner.notifier.lock().await.notify(toast);
    }
}

/// Picks the toast for a failed add: network trouble is worded separately
fn failure_notice(
    error: &StorefrontError,
    message: &'static str,
    duration: Duration,
    network_duration: Duration,
) -> (&'static str, Duration) {
    if error.is_transport() {
        (NETWORK_FAILED_MESSAGE, network_duration)
    } else {
        (message, duration)
    }
}
