use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::utils::error::ShopError;
use crate::web::views;

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let message = match &self {
            ShopError::ProductNotFound { .. } | ShopError::UnknownCartItem { .. } => self.to_string(),
            _ => "Something went wrong on our side.".to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(views::error_page(title, &message))).into_response()
    }
}
