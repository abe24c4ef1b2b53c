//! Catalog browsing service: home page counts, books and genres

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetail, BookListing, BookSummary, CatalogSummary},
        book_instance::BookInstanceStatus,
        genre::Genre,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record counts for the home page
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.book_instances.count(),
            self.repository
                .book_instances
                .count_with_status(BookInstanceStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(CatalogSummary {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    pub async fn books(&self) -> AppResult<Vec<BookListing>> {
        self.repository.books.find_all().await
    }

    /// Book with author, genres and copies
    pub async fn book_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self
            .repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let (author, genres, instances) = tokio::try_join!(
            self.repository.authors.find_by_id(book.author_id),
            self.repository.genres.find_by_book(id),
            self.repository.book_instances.find_by_book(id),
        )?;
        let author = author.ok_or_else(|| {
            AppError::Internal(format!("Book {} references missing author {}", id, book.author_id))
        })?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.find_all().await
    }

    /// Genre and the books tagged with it
    pub async fn genre_detail(&self, id: i32) -> AppResult<(Genre, Vec<BookSummary>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok((genre, books))
    }
}
