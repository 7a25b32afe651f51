pub mod cart;
pub mod catalog;

pub use crate::domain::model::{CartLine, CartSummary, Product, ProductId, SessionState};
pub use crate::domain::ports::{CatalogLookup, CatalogSource, ConfigProvider, SessionStore};
pub use crate::utils::error::Result;
