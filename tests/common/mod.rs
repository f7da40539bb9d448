//! In-process mock storefront for integration tests
//!
//! Serves the same endpoints as the real store on an ephemeral port. Carts
//! live in a `DashMap` keyed by a `cart_session` cookie, and every request
//! is recorded so tests can assert on exactly what the client sent.
//!
//! A few magic values trigger edge cases:
//! - `q=slow` delays the listing response
//! - `q=boom` answers the listing with a 500
//! - `q=garbled` answers the listing with a 200 that is not JSON
//! - product 13 is always refused with `success: false`
//! - product 77 answers its detail with a 200 that is not JSON
//! - product 88 is acknowledged with a bare `{}` on add and update
//!
//! Cart fetches can also be delayed or garbled from the test, see
//! [`MockStore::delay_next_cart`] and [`MockStore::garble_carts`].

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dashmap::DashMap;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Product that the store always refuses to add
pub const REFUSED_PRODUCT: u64 = 13;
/// Product whose detail is a 200 with a body that is not JSON
pub const GARBLED_PRODUCT: u64 = 77;
/// Product whose mutations are acknowledged with a bare `{}`
pub const BARE_ACK_PRODUCT: u64 = 88;
/// Body sent where JSON is expected
const GARBLED_BODY: &str = "<html>temporarily unavailable</html>";
/// Delay applied to `q=slow` listings
pub const SLOW_LISTING_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Serialize)]
pub struct MockProduct {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub image: String,
}

/// A request as the mock store saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    /// Raw query string for GETs, raw form body for POSTs
    pub payload: String,
}

pub type SharedStore = Arc<MockStore>;

pub struct MockStore {
    pub products: Vec<MockProduct>,
    /// Session id -> (product id -> quantity)
    pub carts: DashMap<String, BTreeMap<u64, u32>>,
    pub requests: Mutex<Vec<Recorded>>,
    /// Delay for the next `/api/cart` response only
    next_cart_delay: Mutex<Option<Duration>>,
    /// Answer every `/api/cart` with a body that is not JSON
    garble_carts: AtomicBool,
}

impl MockStore {
    /// Twenty products across two categories, plus a few special ones
    pub fn seeded() -> Self {
        let mut products: Vec<MockProduct> = (1..=20)
            .filter(|id| *id != REFUSED_PRODUCT)
            .map(|id| MockProduct {
                id,
                title: format!("Sneaker {}", id),
                description: "Everyday sneaker with a cushioned sole.".to_string(),
                category: if id % 2 == 0 { "Shoes" } else { "Bags" }.to_string(),
                price: 5.0 * id as f64,
                rating: (id % 6) as f64 + 0.5,
                image: format!("sneaker-{}.jpg", id),
            })
            .collect();

        products.push(MockProduct {
            id: REFUSED_PRODUCT,
            title: "Sold-out Scarf".to_string(),
            description: "Gone for the season.".to_string(),
            category: "Accessories".to_string(),
            price: 19.0,
            rating: 2.0,
            image: String::new(),
        });
        products.push(MockProduct {
            id: 42,
            title: "Canvas Tote".to_string(),
            description: "L".repeat(150),
            category: "Totes".to_string(),
            price: 12.5,
            rating: 4.7,
            image: "https://cdn.example.com/tote.jpg".to_string(),
        });
        products.push(MockProduct {
            id: 99,
            title: "<script>alert(1)</script>".to_string(),
            description: "Fish & chips <b>bold</b>".to_string(),
            category: "Oddities".to_string(),
            price: 1.0,
            rating: 1.0,
            image: "/static/uploads/odd.png".to_string(),
        });
        products.push(MockProduct {
            id: 100,
            title: "Slow Lamp".to_string(),
            description: "slow".to_string(),
            category: "Home".to_string(),
            price: 30.0,
            rating: 3.0,
            image: String::new(),
        });

        Self {
            products,
            carts: DashMap::new(),
            requests: Mutex::new(Vec::new()),
            next_cart_delay: Mutex::new(None),
            garble_carts: AtomicBool::new(false),
        }
    }

    fn record(&self, method: &'static str, path: impl Into<String>, payload: impl Into<String>) {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.into(),
            payload: payload.into(),
        });
    }

    /// All recorded requests to `path`
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Query string of the most recent listing request
    pub fn last_listing_query(&self) -> String {
        self.requests_to("/api/products")
            .last()
            .map(|r| r.payload.clone())
            .unwrap_or_default()
    }

    /// Holds back the next `/api/cart` response by `delay`
    pub fn delay_next_cart(&self, delay: Duration) {
        *self.next_cart_delay.lock().unwrap() = Some(delay);
    }

    /// Switches `/api/cart` between JSON and a non-JSON 200
    pub fn garble_carts(&self, garbled: bool) {
        self.garble_carts.store(garbled, Ordering::SeqCst);
    }

    fn product(&self, id: u64) -> Option<&MockProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    fn summary(&self, session_id: &str) -> Value {
        let cart = self
            .carts
            .get(session_id)
            .map(|c| c.value().clone())
            .unwrap_or_default();

        let mut total = 0.0;
        let mut count = 0;
        let items: Vec<Value> = cart
            .iter()
            .filter_map(|(id, qty)| self.product(*id).map(|p| (p, *qty)))
            .map(|(p, qty)| {
                let subtotal = p.price * qty as f64;
                total += subtotal;
                count += qty;
                json!({
                    "id": p.id,
                    "title": p.title,
                    "price": p.price,
                    "qty": qty,
                    "subtotal": subtotal,
                    "image": p.image,
                })
            })
            .collect();

        json!({ "items": items, "total": total, "count": count })
    }
}

/// Starts the mock store and returns its base URL
pub async fn spawn_store() -> (String, SharedStore) {
    let store = Arc::new(MockStore::seeded());

    let app = Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(product_detail))
        .route("/api/cart", get(get_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/api/cart/add", post(api_add_to_cart))
        .route("/cart/update", post(update_cart))
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

/// A base URL nothing listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// =============================================================================
// Handlers
// =============================================================================

fn parse_pairs(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.replace('+', " ")))
        .collect()
}

/// Reads the session cookie, minting a new session when there is none
fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|c| c.trim().strip_prefix("cart_session="))
        .next()
        .map(str::to_string);

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

fn with_session(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        let cookie = format!("cart_session={}; Path=/; HttpOnly", session_id);
        response
            .headers_mut()
            .insert(header::SET_COOKIE, cookie.parse().unwrap());
    }
    response
}

async fn list_products(State(store): State<SharedStore>, RawQuery(query): RawQuery) -> Response {
    let raw = query.unwrap_or_default();
    store.record("GET", "/api/products", raw.clone());
    let params = parse_pairs(&raw);

    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    if q == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if q == "garbled" {
        return (StatusCode::OK, GARBLED_BODY).into_response();
    }
    if q == "slow" {
        tokio::time::sleep(SLOW_LISTING_DELAY).await;
    }

    let category = params.get("category").cloned().unwrap_or_default();
    let min = params.get("price_min").and_then(|v| v.parse::<f64>().ok());
    let max = params.get("price_max").and_then(|v| v.parse::<f64>().ok());
    let page: usize = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let per_page: usize = params
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(9);

    let mut matching: Vec<&MockProduct> = store
        .products
        .iter()
        .filter(|p| {
            q.is_empty()
                || p.title.to_lowercase().contains(&q)
                || p.description.to_lowercase().contains(&q)
        })
        .filter(|p| category.is_empty() || p.category == category)
        .filter(|p| min.map_or(true, |m| p.price >= m))
        .filter(|p| max.map_or(true, |m| p.price <= m))
        .collect();

    match params.get("sort").map(String::as_str) {
        Some("price_asc") => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some("price_desc") => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
        _ => matching.sort_by(|a, b| b.id.cmp(&a.id)),
    }

    let total = matching.len();
    let pages = total.div_ceil(per_page.max(1));
    let products: Vec<&MockProduct> = matching
        .into_iter()
        .skip((page.max(1) - 1) * per_page)
        .take(per_page)
        .collect();

    Json(json!({
        "products": products,
        "total": total,
        "page": page,
        "pages": pages,
        "per_page": per_page,
    }))
    .into_response()
}

async fn product_detail(State(store): State<SharedStore>, Path(id): Path<u64>) -> Response {
    store.record("GET", format!("/api/products/{}", id), "");
    if id == GARBLED_PRODUCT {
        return (StatusCode::OK, GARBLED_BODY).into_response();
    }
    match store.product(id) {
        Some(product) => Json(product.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}

async fn get_cart(State(store): State<SharedStore>, headers: HeaderMap) -> Response {
    store.record("GET", "/api/cart", "");
    let (session_id, is_new) = resolve_session_id(&headers);

    let delay = store.next_cart_delay.lock().unwrap().take();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let response = if store.garble_carts.load(Ordering::SeqCst) {
        (StatusCode::OK, GARBLED_BODY).into_response()
    } else {
        Json(store.summary(&session_id)).into_response()
    };
    with_session(response, &session_id, is_new)
}

async fn add_to_cart(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: String,
) -> Response {
    add_item(&store, "/cart/add", &headers, body)
}

async fn api_add_to_cart(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: String,
) -> Response {
    add_item(&store, "/api/cart/add", &headers, body)
}

fn add_item(store: &MockStore, path: &'static str, headers: &HeaderMap, body: String) -> Response {
    store.record("POST", path, body.clone());
    let (session_id, is_new) = resolve_session_id(headers);
    let form = parse_pairs(&body);

    let Some(id) = form.get("product_id").and_then(|v| v.parse::<u64>().ok()) else {
        let response = (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "invalid product_id" })),
        );
        return with_session(response.into_response(), &session_id, is_new);
    };
    let qty: u32 = form.get("qty").and_then(|v| v.parse().ok()).unwrap_or(1);

    let response = if id == REFUSED_PRODUCT {
        Json(json!({ "success": false, "error": "out of stock" })).into_response()
    } else if id == BARE_ACK_PRODUCT {
        Json(json!({})).into_response()
    } else if store.product(id).is_none() {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "product not found" })),
        )
            .into_response()
    } else {
        *store
            .carts
            .entry(session_id.clone())
            .or_default()
            .entry(id)
            .or_insert(0) += qty;
        Json(json!({ "success": true, "cart": store.summary(&session_id) })).into_response()
    };

    with_session(response, &session_id, is_new)
}

async fn update_cart(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: String,
) -> Response {
    store.record("POST", "/cart/update", body.clone());
    let (session_id, is_new) = resolve_session_id(&headers);
    let form = parse_pairs(&body);

    let id = form.get("product_id").and_then(|v| v.parse::<u64>().ok());
    let qty = form.get("qty").and_then(|v| v.parse::<u32>().ok());

    let response = match (id, qty) {
        (Some(BARE_ACK_PRODUCT), Some(_)) => Json(json!({})).into_response(),
        (Some(REFUSED_PRODUCT), Some(_)) => {
            Json(json!({ "success": false, "error": "item is locked" })).into_response()
        }
        (Some(id), Some(0)) => {
            if let Some(mut cart) = store.carts.get_mut(&session_id) {
                cart.remove(&id);
            }
            Json(json!({ "success": true, "cart": store.summary(&session_id) })).into_response()
        }
        (Some(id), Some(qty)) if store.product(id).is_some() => {
            store.carts.entry(session_id.clone()).or_default().insert(id, qty);
            Json(json!({ "success": true, "cart": store.summary(&session_id) })).into_response()
        }
        _ => Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"success":false,"error":"invalid request"}"#))
            .unwrap(),
    };

    with_session(response, &session_id, is_new)
}
