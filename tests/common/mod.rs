//! In-process stand-in for the catalog REST API.
//!
//! Serves a canned catalog over real HTTP on an ephemeral port and
//! records every request it sees, so tests can assert which calls were
//! made and, just as importantly, which were not.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;

use catalog_admin::models::activity_model::Activity;
use catalog_admin::models::product_model::{Product, ProductPage};

/// One recorded request: method, path with query, and the raw body.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub body: String,
}

#[derive(Clone)]
struct StubCatalog {
    products: Arc<Mutex<Vec<Product>>>,
    activities: Arc<Vec<Activity>>,
    reject: Arc<Vec<Method>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running stub: its base URL and the request log.
pub struct StubHandle {
    pub base_url: String,
    products: Arc<Mutex<Vec<Product>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubHandle {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn count_matching(&self, method: &str, path_prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| {
                request.method == method && request.path_and_query.starts_with(path_prefix)
            })
            .count()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Swap the served catalog under the running stub.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }
}

/// Start the stub server. The listener task lives until the test
/// runtime shuts down.
pub async fn start_stub(products: Vec<Product>, activities: Vec<Activity>) -> StubHandle {
    start_stub_rejecting(products, activities, Vec::new()).await
}

/// Like `start_stub`, but requests made with one of the `reject`
/// methods are recorded and then answered with a 500.
pub async fn start_stub_rejecting(
    products: Vec<Product>,
    activities: Vec<Activity>,
    reject: Vec<Method>,
) -> StubHandle {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    let stub = StubCatalog {
        products: Arc::new(Mutex::new(products)),
        activities: Arc::new(activities),
        reject: Arc::new(reject),
        requests: Arc::new(Mutex::new(Vec::new())),
    };
    let products = stub.products.clone();
    let requests = stub.requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let io = TokioIo::new(stream);
            let stub = stub.clone();
            tokio::spawn(async move {
                let service = service_fn(move |request| handle(stub.clone(), request));
                let _ = http1::Builder::new().serve_connection(io, service).await;
            });
        }
    });

    StubHandle {
        base_url: format!("http://{}", addr),
        products,
        requests,
    }
}

async fn handle(
    stub: StubCatalog,
    request: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let body = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => Bytes::new(),
    };

    stub.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path_and_query,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if stub.reject.contains(&method) {
        return Ok(server_error());
    }

    let products = stub.products.lock().unwrap();
    let response = match (&method, path.as_str()) {
        (&Method::GET, "/users") => json_response(StatusCode::OK, &*stub.activities),
        (&Method::GET, "/products") => match query.as_deref() {
            Some(query) => {
                let page = query_param(query, "page").unwrap_or(1);
                let limit = query_param(query, "limit").unwrap_or(products.len().max(1));
                json_response(StatusCode::OK, &page_slice(&products, page, limit))
            }
            None => json_response(StatusCode::OK, &*products),
        },
        (&Method::POST, "/products") => json_response(
            StatusCode::CREATED,
            &serde_json::json!({"acknowledged": true}),
        ),
        (method, path) if path.starts_with("/products/") => {
            let name = percent_decode_str(&path["/products/".len()..])
                .decode_utf8_lossy()
                .into_owned();
            let existing = products.iter().find(|product| product.name == name);
            match (existing, method) {
                (Some(product), &Method::GET) => json_response(StatusCode::OK, product),
                (Some(_), &Method::PUT) => {
                    json_response(StatusCode::OK, &serde_json::json!({"acknowledged": true}))
                }
                (Some(_), &Method::DELETE) => {
                    json_response(StatusCode::OK, &serde_json::json!({"deleted": 1}))
                }
                (None, _) => not_found(),
                _ => json_response(
                    StatusCode::METHOD_NOT_ALLOWED,
                    &serde_json::json!({"error": "method not allowed"}),
                ),
            }
        }
        _ => not_found(),
    };
    Ok(response)
}

fn query_param(query: &str, key: &str) -> Option<usize> {
    query.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == key => v.parse().ok(),
            _ => None,
        }
    })
}

fn page_slice(products: &[Product], page: usize, limit: usize) -> ProductPage {
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = (start + limit).min(products.len());
    let slice = if start >= products.len() {
        Vec::new()
    } else {
        products[start..end].to_vec()
    };
    ProductPage {
        total: products.len(),
        products: slice,
    }
}

fn json_response<T: serde::Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).expect("serialize stub response");
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("build stub response")
}

fn not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({"error": "not found"}),
    )
}

fn server_error() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &serde_json::json!({"error": "internal error"}),
    )
}

/// Product fixture with the availability flag under test and neutral
/// pricing.
pub fn product(name: &str, category: &str, in_stock: bool) -> Product {
    Product {
        id: None,
        name: name.to_string(),
        desc: format!("{} description", name),
        category: category.to_string(),
        brand: "Acme".to_string(),
        sku: format!("SKU-{}", name),
        price: 10.0,
        sale_price: 0.0,
        in_stock,
        quantity: 1,
        image_url: String::new(),
    }
}

/// Product fixture with explicit pricing, for the dashboard figures.
pub fn priced(name: &str, price: f64, sale_price: f64, quantity: i64) -> Product {
    Product {
        quantity,
        price,
        sale_price,
        ..product(name, "General", true)
    }
}

pub fn activity(name: &str, action: &str, timestamp: &str, details: &str) -> Activity {
    Activity {
        id: None,
        name: name.to_string(),
        action: action.to_string(),
        timestamp: timestamp.to_string(),
        details: details.to_string(),
    }
}
