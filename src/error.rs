//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::{html::HtmlRenderer, ErrorPage, Page, Renderer};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(e: std::fmt::Error) -> Self {
        AppError::Render(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            message,
        };

        // The router re-renders this with the configured renderer; the
        // default HTML body covers responses produced outside of it.
        let mut response = match HtmlRenderer::default().render(&Page::Error(page.clone())) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                status.into_response()
            }
        };
        response.extensions_mut().insert(page);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
