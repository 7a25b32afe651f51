pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::cli::ServeArgs;
pub use config::AppConfig;

pub use crate::core::{
    cart::{add_to_cart, aggregate},
    catalog::Catalog,
};
pub use domain::model::{CartLine, CartSummary, Product, ProductId, SessionState};
pub use utils::error::{Result, ShopError};
