pub mod auth;
pub mod clients;
pub mod evidence;
pub mod history;
pub mod prices;
pub mod products;
pub mod skus;
