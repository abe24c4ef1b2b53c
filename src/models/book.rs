//! Book model and the read projections used by the catalog pages

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Author, BookInstance, Genre};

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
}

impl Book {
    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    pub fn url_for(id: i32) -> String {
        format!("/catalog/book/{}", id)
    }
}

/// Title and summary only, used when listing an author's books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        Book::url_for(self.id)
    }
}

/// Id and title, used by the book selection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookTitle {
    pub id: i32,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        Book::url_for(self.id)
    }
}

/// Book list row with the author's name joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookListing {
    pub id: i32,
    pub title: String,
    pub author_first_name: String,
    pub author_family_name: String,
}

impl BookListing {
    pub fn url(&self) -> String {
        Book::url_for(self.id)
    }

    pub fn author_name(&self) -> String {
        format!("{}, {}", self.author_family_name, self.author_first_name)
    }
}

/// Book with its author, genres and copies resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}
