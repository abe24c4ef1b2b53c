//! Local Library catalog server
//!
//! Server-rendered HTML pages for browsing the catalog and for creating,
//! updating and deleting authors and book copies.

use std::sync::Arc;

use axum::response::Html;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod sanitize;
pub mod services;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use views::{Page, Renderer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub views: Arc<dyn Renderer>,
}

impl AppState {
    /// Render a page with the configured renderer
    pub fn render(&self, page: Page) -> AppResult<Html<String>> {
        self.views.render(&page).map(Html)
    }
}
