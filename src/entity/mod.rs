pub mod clients;
pub mod competitors;
pub mod evidence;
pub mod price_history;
pub mod prices;
pub mod products;
pub mod skus;
pub mod users;

pub use clients::Entity as Clients;
pub use competitors::Entity as Competitors;
pub use evidence::Entity as EvidenceFiles;
pub use price_history::Entity as PriceHistory;
pub use prices::Entity as Prices;
pub use products::Entity as Products;
pub use skus::Entity as Skus;
pub use users::Entity as Users;
