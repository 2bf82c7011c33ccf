use serde::{Deserialize, Serialize};

/// A catalog product as the REST API serves it. Field names follow the
/// API's JSON, camelCase with the abbreviated `desc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier. Kept opaque because the API emits
    /// either a plain string or extended JSON like `{"$oid": "..."}`.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub desc: String,
    pub category: String,
    pub brand: String,
    pub sku: String,
    pub price: f64,
    pub sale_price: f64,
    pub in_stock: bool,
    pub quantity: i64,
    pub image_url: String,
}

impl Product {
    /// Unit price used for revenue figures: the sale price when one is
    /// set, otherwise the regular price.
    pub fn effective_price(&self) -> f64 {
        if self.sale_price > 0.0 {
            self.sale_price
        } else {
            self.price
        }
    }

    /// Availability label shown in the product list.
    pub fn availability(&self) -> &'static str {
        if self.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }
}

/// One page slice of the catalog, as returned by `GET /products?page&limit`.
/// `total` counts the whole catalog, not the slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub total: usize,
    pub products: Vec<Product>,
}
