//! Page definitions and the renderer seam
//!
//! A [`Page`] names a template and carries the data it needs. Handlers build
//! a page and hand it to the [`Renderer`] held in the application state.

pub mod html;

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorForm, BookDetail, BookInstanceForm, BookInstanceWithBook, BookListing,
        BookSummary, BookTitle, CatalogSummary, FieldError, Genre, Message,
    },
};

/// Turns a page into a response body
pub trait Renderer: Send + Sync {
    fn render(&self, page: &Page) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
#[serde(tag = "template", content = "context", rename_all = "snake_case")]
pub enum Page {
    Index(IndexPage),
    AuthorList(AuthorListPage),
    AuthorDetail(AuthorDetailPage),
    AuthorForm(AuthorFormPage),
    AuthorDelete(AuthorDeletePage),
    BookList(BookListPage),
    BookDetail(BookDetailPage),
    GenreList(GenreListPage),
    GenreDetail(GenreDetailPage),
    #[serde(rename = "bookinstance_list")]
    BookInstanceList(BookInstanceListPage),
    #[serde(rename = "bookinstance_detail")]
    BookInstanceDetail(BookInstanceDetailPage),
    #[serde(rename = "bookinstance_form")]
    BookInstanceForm(BookInstanceFormPage),
    #[serde(rename = "bookinstance_delete")]
    BookInstanceDelete(BookInstanceDeletePage),
    MessageList(MessageListPage),
    MessageForm,
    Error(ErrorPage),
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub summary: CatalogSummary,
}

#[derive(Debug, Serialize)]
pub struct AuthorListPage {
    pub authors: Vec<Author>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetailPage {
    pub author: Author,
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct AuthorFormPage {
    pub title: &'static str,
    pub author: AuthorForm,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDeletePage {
    pub author_id: i32,
    pub author: Option<Author>,
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookListPage {
    pub books: Vec<BookListing>,
}

#[derive(Debug, Serialize)]
pub struct BookDetailPage {
    pub detail: BookDetail,
}

#[derive(Debug, Serialize)]
pub struct GenreListPage {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailPage {
    pub genre: Genre,
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceListPage {
    pub instances: Vec<BookInstanceWithBook>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDetailPage {
    pub instance: BookInstanceWithBook,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceFormPage {
    pub title: &'static str,
    pub books: Vec<BookTitle>,
    pub selected_book: Option<i32>,
    pub instance: BookInstanceForm,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDeletePage {
    pub instance: BookInstanceWithBook,
}

#[derive(Debug, Serialize)]
pub struct MessageListPage {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}

/// Emits the page as JSON so tests can inspect what a handler rendered.
#[cfg(test)]
pub struct JsonRenderer;

#[cfg(test)]
impl Renderer for JsonRenderer {
    fn render(&self, page: &Page) -> AppResult<String> {
        serde_json::to_string(page).map_err(|e| crate::error::AppError::Render(e.to_string()))
    }
}
