//! Key-metrics aggregation for the dashboard view.

use crate::api::product_api::ProductApi;
use crate::errors::ApiError;
use crate::models::product_model::Product;

/// The dashboard numbers, computed over the whole catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMetrics {
    pub total_products: usize,
    /// Revenue at effective unit prices times stocked quantity.
    pub total_sales: f64,
    /// Total sales divided by the total unit count, zero for an empty
    /// catalog.
    pub average_order_value: f64,
}

/// Aggregate the catalog in one pass.
pub fn compute_metrics(products: &[Product]) -> KeyMetrics {
    let mut total_sales = 0.0;
    let mut total_units: i64 = 0;
    for product in products {
        total_sales += product.effective_price() * product.quantity as f64;
        total_units += product.quantity;
    }
    let average_order_value = if total_units > 0 {
        total_sales / total_units as f64
    } else {
        0.0
    };
    KeyMetrics {
        total_products: products.len(),
        total_sales,
        average_order_value,
    }
}

/// Fetches the catalog and reduces it to `KeyMetrics`.
pub struct DashboardService {
    api: ProductApi,
}

impl DashboardService {
    pub fn new(api: ProductApi) -> Self {
        Self { api }
    }

    pub async fn fetch_metrics(&self) -> Result<KeyMetrics, ApiError> {
        let products = self.api.list_products().await?;
        Ok(compute_metrics(&products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, sale_price: f64, quantity: i64) -> Product {
        Product {
            id: None,
            name: "Widget".to_string(),
            desc: String::new(),
            category: "Tools".to_string(),
            brand: "Acme".to_string(),
            sku: "W-1".to_string(),
            price,
            sale_price,
            in_stock: true,
            quantity,
            image_url: String::new(),
        }
    }

    #[test]
    fn sales_use_sale_price_only_when_set() {
        // 10 * 2 at full price plus 15 * 1 at sale price, 3 units total.
        let products = vec![product(10.0, 0.0, 2), product(20.0, 15.0, 1)];
        let metrics = compute_metrics(&products);
        assert_eq!(metrics.total_products, 2);
        assert_eq!(metrics.total_sales, 35.0);
        assert_eq!(metrics.average_order_value, 35.0 / 3.0);
    }

    #[test]
    fn empty_catalog_yields_zeroes() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics.total_products, 0);
        assert_eq!(metrics.total_sales, 0.0);
        assert_eq!(metrics.average_order_value, 0.0);
    }

    #[test]
    fn zero_quantity_products_count_but_do_not_sell() {
        let products = vec![product(10.0, 0.0, 0)];
        let metrics = compute_metrics(&products);
        assert_eq!(metrics.total_products, 1);
        assert_eq!(metrics.total_sales, 0.0);
        assert_eq!(metrics.average_order_value, 0.0);
    }
}
