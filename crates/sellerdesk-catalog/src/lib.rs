pub mod account;
pub mod client;
pub mod error;
pub mod products;
pub(crate) mod retry;
pub mod types;
pub mod variations;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{AccountDetail, ShopInfo};
