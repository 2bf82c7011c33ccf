pub mod activity_model;
pub mod product_model;
pub mod schema_model;
