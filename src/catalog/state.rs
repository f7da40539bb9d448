//! Catalog Query Client
//!
//! Owns the listing query state, issues `/api/products` requests and renders
//! the results into a [`CatalogView`]. Each transition (filter, sort, page)
//! ends in a fresh query. Responses are sequenced so a slow, superseded
//! request can never overwrite the results of a newer one.

use super::helpers::{page_links, product_card, product_detail, query_params, result_info};
use super::models::{FilterUpdate, QueryState};
use crate::api::{ApiClient, ProductPage};
use crate::render::{CatalogView, ProductCard};
use crate::sequence::RequestSequence;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Grid message when the filters match nothing
pub const NO_RESULTS_MESSAGE: &str = "No products found.";
/// Grid message when the listing could not be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Could not load products.";

/// What happened to a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The response was rendered
    Applied,
    /// A newer response had already been rendered; this one was dropped
    Stale,
    /// The request failed and the empty-state message was rendered
    Failed,
}

/// Shared handle to the catalog client.
///
/// Clones refer to the same query state and view.
pub struct CatalogClient<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for CatalogClient<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<V> {
    api: ApiClient,
    state: Mutex<QueryState>,
    view: Mutex<V>,
    sequence: RequestSequence,
}

impl<V: CatalogView> CatalogClient<V> {
    /// Creates a client on page 1 with no filters
    pub fn new(api: ApiClient, view: V) -> Self {
        let state = QueryState::new(api.config().page_size);
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(state),
                view: Mutex::new(view),
                sequence: RequestSequence::new(),
            }),
        }
    }

    /// Snapshot of the current query state
    pub async fn state(&self) -> QueryState {
        self.inner.state.lock().await.clone()
    }

    /// Locks the render target, e.g. to scroll it or inspect it
    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.inner.view.lock().await
    }

    /// Merges `update` into the filters, goes back to page 1 and re-queries
    pub async fn set_filter(&self, update: FilterUpdate) -> QueryOutcome {
        let category = update.category.clone();
        self.inner.state.lock().await.apply(update);

        if let Some(category) = category {
            self.inner.view.lock().await.set_active_category(&category);
        }

        self.query().await
    }

    /// Applies `update` and jumps straight to `page` with a single query,
    /// e.g. when opening a bookmarked listing
    pub async fn open_at(&self, update: FilterUpdate, page: u32) -> QueryOutcome {
        {
            let mut state = self.inner.state.lock().await;
            state.apply(update);
            state.set_page(page);
        }
        self.query().await
    }

    /// Moves to `page` without touching the filters and re-queries
    pub async fn set_page(&self, page: u32) -> QueryOutcome {
        self.inner.state.lock().await.set_page(page);
        self.query().await
    }

    /// Fetches the listing for the current state and renders it.
    ///
    /// Failures of any kind render the empty-state message and are logged;
    /// nothing is retried.
    pub async fn query(&self) -> QueryOutcome {
        let (params, ticket) = {
            let state = self.inner.state.lock().await;
            (query_params(&state), self.inner.sequence.issue())
        };

        let result = self.inner.api.list_products(&params).await;

        let mut view = self.inner.view.lock().await;
        if !self.inner.sequence.try_apply(ticket) {
            tracing::debug!("dropping stale listing response #{}", ticket);
            return QueryOutcome::Stale;
        }

        match result {
            Ok(listing) => {
                self.render_listing(&mut *view, &listing);
                QueryOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("listing query #{} failed: {}", ticket, e);
                view.render_empty(LOAD_FAILED_MESSAGE);
                QueryOutcome::Failed
            }
        }
    }

    fn render_listing(&self, view: &mut V, listing: &ProductPage) {
        let config = self.inner.api.config();

        if listing.products.is_empty() {
            view.render_empty(NO_RESULTS_MESSAGE);
        } else {
            let cards: Vec<ProductCard> = listing
                .products
                .iter()
                .map(|product| product_card(product, config))
                .collect();
            view.render_products(&cards);
        }

        view.render_pagination(&page_links(listing.page, listing.pages));
        view.set_result_info(&result_info(listing));
    }

    /// Loads one product and shows it in the detail view.
    ///
    /// Returns whether the detail was shown; failures are only logged.
    pub async fn show_detail(&self, product_id: u64) -> bool {
        match self.inner.api.product(product_id).await {
            Ok(product) => {
                let detail = product_detail(&product, self.inner.api.config());
                self.inner.view.lock().await.show_detail(&detail);
                true
            }
            Err(e) => {
                tracing::warn!("could not load product {}: {}", product_id, e);
                false
            }
        }
    }
}
