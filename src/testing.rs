//! Helpers for driving the router against mocked repositories

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    api,
    repository::{
        authors::MockAuthorRepository, book_instances::MockBookInstanceRepository,
        books::MockBookRepository, genres::MockGenreRepository, InMemoryMessageStore,
        MessageStore, Repository,
    },
    services::Services,
    views::{JsonRenderer, Renderer},
    AppState,
};

/// One mock per repository. A mock without expectations panics when called.
pub struct Mocks {
    pub authors: MockAuthorRepository,
    pub books: MockBookRepository,
    pub genres: MockGenreRepository,
    pub book_instances: MockBookInstanceRepository,
    pub messages: Arc<dyn MessageStore>,
}

impl Mocks {
    pub fn new() -> Self {
        Self {
            authors: MockAuthorRepository::new(),
            books: MockBookRepository::new(),
            genres: MockGenreRepository::new(),
            book_instances: MockBookInstanceRepository::new(),
            messages: Arc::new(InMemoryMessageStore::seeded()),
        }
    }

    pub fn into_app(self) -> Router {
        self.into_app_with(Arc::new(JsonRenderer))
    }

    pub fn into_app_with(self, views: Arc<dyn Renderer>) -> Router {
        let repository = Repository {
            authors: Arc::new(self.authors),
            books: Arc::new(self.books),
            genres: Arc::new(self.genres),
            book_instances: Arc::new(self.book_instances),
        };
        api::router(AppState {
            services: Arc::new(Services::new(repository, self.messages)),
            views,
        })
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Rendered page as `{"template": ..., "context": ...}`
    pub fn page(&self) -> Value {
        serde_json::from_str(&self.body).expect("body is not a rendered page")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
