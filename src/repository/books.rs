//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookListing, BookSummary, BookTitle},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books with their author's name, ordered by title
    async fn find_all(&self) -> AppResult<Vec<BookListing>>;

    /// Id and title of every book, ordered by title ascending
    async fn find_titles(&self) -> AppResult<Vec<BookTitle>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Title and summary of every book written by `author_id`
    async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>>;

    /// Title and summary of every book tagged with `genre_id`
    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookSummary>>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_all(&self) -> AppResult<Vec<BookListing>> {
        let rows = sqlx::query_as::<_, BookListing>(
            r#"
            SELECT b.id, b.title,
                   a.first_name AS author_first_name,
                   a.family_name AS author_family_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, summary, isbn, author_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.id, b.title, b.summary
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
