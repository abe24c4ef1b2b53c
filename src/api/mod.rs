//! HTTP handlers and routes

pub mod authors;
pub mod book_instances;
pub mod catalog;
pub mod health;
pub mod messages;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::AppError,
    views::{ErrorPage, Page},
    AppState,
};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(messages::home))
        .route("/new", get(messages::new_message_get).post(messages::new_message_post))
        .route("/messages", get(messages::message_list))
        .route("/health", get(health::health_check))
        // Catalog home, books and genres
        .route("/catalog", get(catalog::index))
        .route("/catalog/books", get(catalog::book_list))
        .route("/catalog/book/:id", get(catalog::book_detail))
        .route("/catalog/genres", get(catalog::genre_list))
        .route("/catalog/genre/:id", get(catalog::genre_detail))
        // Authors
        .route("/catalog/authors", get(authors::author_list))
        .route(
            "/catalog/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/catalog/author/:id", get(authors::author_detail))
        .route(
            "/catalog/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/catalog/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Book instances
        .route("/catalog/bookinstances", get(book_instances::book_instance_list))
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::book_instance_create_get)
                .post(book_instances::book_instance_create_post),
        )
        .route("/catalog/bookinstance/:id", get(book_instances::book_instance_detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::book_instance_delete_get)
                .post(book_instances::book_instance_delete_post),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::book_instance_update_get)
                .post(book_instances::book_instance_update_post),
        )
        .layer(middleware::from_fn_with_state(state.clone(), render_error_page))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render error responses with the application's renderer
async fn render_error_page(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let status = response.status();
    match state.render(Page::Error(page)) {
        Ok(body) => (status, body).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}

/// Parse the record id carried in a delete form body
fn form_id(value: &str, field: &str) -> Result<i32, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Missing or invalid {}", field)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::{
        config::ViewsConfig,
        testing::{get, post_form, Mocks},
        views::html::HtmlRenderer,
    };

    #[tokio::test]
    async fn test_error_page_uses_configured_site_title() {
        let mut mocks = Mocks::new();
        mocks.authors.expect_find_by_id().returning(|_| Ok(None));
        let app = mocks.into_app_with(Arc::new(HtmlRenderer::new(&ViewsConfig {
            site_title: "Riverside Branch".to_string(),
        })));

        let res = get(app, "/catalog/author/9/update").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.body.contains("<title>Error | Riverside Branch</title>"));
        assert!(res.body.contains("<h2>404</h2><p>Author not found</p>"));
    }

    #[tokio::test]
    async fn test_error_page_goes_through_renderer() {
        let res = post_form(Mocks::new().into_app(), "/catalog/bookinstance/3/delete", "").await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        let page = res.page();
        assert_eq!(page["template"], "error");
        assert_eq!(page["context"]["status"], 400);
        assert_eq!(page["context"]["message"], "Missing or invalid bookInstanceId");
    }
}
