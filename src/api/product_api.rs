use hyper::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::info;

use crate::api::{build_client, decode, decode_loose, send_empty, send_json, status_error, HttpClient};
use crate::errors::ApiError;
use crate::models::product_model::{Product, ProductPage};
use crate::models::schema_model::FormValues;

/// Bytes that cannot travel raw inside one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// Client for the `/products` endpoints of the catalog API.
pub struct ProductApi {
    client: HttpClient,
    base_url: String,
}

impl ProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    /// URL of the name-keyed endpoints. The name is percent-encoded as
    /// one path segment so catalog names with spaces stay addressable.
    fn product_url(&self, name: &str) -> String {
        format!(
            "{}/products/{}",
            self.base_url,
            utf8_percent_encode(name, PATH_SEGMENT)
        )
    }

    /// Fetch the whole catalog.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = format!("{}/products", self.base_url);
        let (status, body) = send_empty(&self.client, Method::GET, &url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "product collection"));
        }
        let products: Vec<Product> = decode(&body)?;
        info!("Retrieved {} products", products.len());
        Ok(products)
    }

    /// Fetch one page slice together with the server-reported total.
    pub async fn products_page(&self, page: usize, limit: usize) -> Result<ProductPage, ApiError> {
        let url = format!("{}/products?page={}&limit={}", self.base_url, page, limit);
        let (status, body) = send_empty(&self.client, Method::GET, &url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "product page"));
        }
        let page_slice: ProductPage = decode(&body)?;
        info!(
            "Retrieved page {} with {} of {} products",
            page,
            page_slice.products.len(),
            page_slice.total
        );
        Ok(page_slice)
    }

    /// Look up a single product by name. A 404 maps to `ApiError::NotFound`.
    pub async fn get_product(&self, name: &str) -> Result<Product, ApiError> {
        let url = self.product_url(name);
        let (status, body) = send_empty(&self.client, Method::GET, &url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, &format!("Product \"{}\"", name)));
        }
        decode(&body)
    }

    /// Submit a new product. The response body is only logged by callers,
    /// so it stays an opaque JSON value.
    pub async fn create_product(&self, values: &FormValues) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/products", self.base_url);
        let (status, body) = send_json(&self.client, Method::POST, &url, values).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, "product collection"));
        }
        Ok(decode_loose(&body))
    }

    /// Replace the product stored under `name` with the submitted values.
    pub async fn update_product(
        &self,
        name: &str,
        values: &FormValues,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.product_url(name);
        let (status, body) = send_json(&self.client, Method::PUT, &url, values).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, &format!("Product \"{}\"", name)));
        }
        Ok(decode_loose(&body))
    }

    /// Delete the product stored under `name`.
    pub async fn delete_product(&self, name: &str) -> Result<(), ApiError> {
        let url = self.product_url(name);
        let (status, body) = send_empty(&self.client, Method::DELETE, &url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, &format!("Product \"{}\"", name)));
        }
        Ok(())
    }
}
