pub mod activity_service;
pub mod dashboard_service;
pub mod form_service;
pub mod list_service;
