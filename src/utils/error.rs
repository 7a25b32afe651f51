use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Catalog request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("No melon with id {id}")]
    ProductNotFound { id: ProductId },

    #[error("Cart refers to unknown melon id {id}")]
    UnknownCartItem { id: ProductId },

    #[error("Session error: {message}")]
    SessionError { message: String },
}

impl ShopError {
    /// 是否為使用者端可見的「找不到」錯誤
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShopError::ProductNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
