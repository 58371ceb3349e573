pub mod auth_service;
pub mod client_service;
pub mod evidence_service;
pub mod history_service;
pub mod price_service;
pub mod product_service;
pub mod sku_service;
