//! Event routing for the storefront page
//!
//! `Storefront` wires a catalog client and a cart client to one shared API
//! session and routes each [`UiEvent`] to the right operation. Search input
//! goes through a debouncer first.

pub mod events;

pub use events::UiEvent;

use crate::api::ApiClient;
use crate::cart::CartClient;
use crate::catalog::{CatalogClient, FilterUpdate, SortOrder};
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::render::{CartView, CatalogView, Notifier};

/// The storefront page: catalog, cart and the debounced search box
pub struct Storefront<C, K, N> {
    catalog: CatalogClient<C>,
    cart: CartClient<K, N>,
    search: Debouncer<String>,
}

/// Creates a storefront for `config` with its own session.
///
/// Must be called from within a tokio runtime.
pub fn create_storefront<C, K, N>(
    config: ClientConfig,
    catalog_view: C,
    cart_view: K,
    notifier: N,
) -> Result<Storefront<C, K, N>>
where
    C: CatalogView + 'static,
    K: CartView,
    N: Notifier,
{
    let api = ApiClient::new(config)?;
    Ok(Storefront::new(api, catalog_view, cart_view, notifier))
}

impl<C, K, N> Storefront<C, K, N>
where
    C: CatalogView + 'static,
    K: CartView,
    N: Notifier,
{
    /// Builds the page on an existing API session
    pub fn new(api: ApiClient, catalog_view: C, cart_view: K, notifier: N) -> Self {
        let debounce = api.config().debounce;
        let catalog = CatalogClient::new(api.clone(), catalog_view);
        let cart = CartClient::new(api, cart_view, notifier);

        let searcher = catalog.clone();
        let search = Debouncer::spawn(debounce, move |text: String| {
            let catalog = searcher.clone();
            async move {
                catalog.set_filter(FilterUpdate::text(text)).await;
            }
        });

        Self {
            catalog,
            cart,
            search,
        }
    }

    pub fn catalog(&self) -> &CatalogClient<C> {
        &self.catalog
    }

    pub fn cart(&self) -> &CartClient<K, N> {
        &self.cart
    }

    /// Initial page load: first listing page and the header count
    pub async fn start(&self) {
        self.catalog.query().await;
        self.cart.refresh_count().await;
    }

    /// Routes one UI event to its operation
    pub async fn handle(&self, event: UiEvent) {
        tracing::debug!("ui event: {:?}", event);

        match event {
            UiEvent::SearchInput(text) => self.search.push(text),
            UiEvent::CategorySelected(category) => {
                self.catalog
                    .set_filter(FilterUpdate::category(category))
                    .await;
            }
            UiEvent::PriceApplied { min, max } => {
                self.catalog
                    .set_filter(FilterUpdate::price_range(&min, &max))
                    .await;
            }
            UiEvent::SortChanged(value) => {
                self.catalog
                    .set_filter(FilterUpdate::sort(SortOrder::parse(&value)))
                    .await;
            }
            UiEvent::PageSelected(page) => {
                self.catalog.set_page(page).await;
            }
            UiEvent::ViewDetail(id) => {
                self.catalog.show_detail(id).await;
            }
            UiEvent::AddToCart(id) => {
                self.cart.add_to_cart(id, 1).await;
            }
            UiEvent::AddFromDetail(id) => {
                self.cart.add_from_detail(id).await;
            }
            UiEvent::RemoveFromCart(id) => {
                self.cart.remove_from_cart(id).await;
            }
            UiEvent::OpenCart => self.cart.open_drawer().await,
        }
    }

    /// Flushes pending search input and shuts the page down
    pub async fn close(self) {
        self.search.close().await;
    }
}
