//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, NewAuthor},
        book::BookSummary,
    },
    repository::Repository,
};

/// Result of an author delete request
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// Books still reference the author; nothing was removed
    HasBooks {
        author: Option<Author>,
        books: Vec<BookSummary>,
    },
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.find_all().await
    }

    /// Get an author, failing with NotFound when absent
    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Author and the books they wrote
    pub async fn detail(&self, id: i32) -> AppResult<(Author, Vec<BookSummary>)> {
        let (author, books) = self.with_books(id).await?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok((author, books))
    }

    /// Author (if any) and the books that would block deleting them
    pub async fn with_books(&self, id: i32) -> AppResult<(Option<Author>, Vec<BookSummary>)> {
        tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_by_author(id),
        )
    }

    pub async fn create(&self, author: NewAuthor) -> AppResult<Author> {
        let created = self.repository.authors.create(&author).await?;
        tracing::info!("Author created: id={} name={}", created.id, created.name());
        Ok(created)
    }

    /// Replace the author's fields, failing with NotFound when absent
    pub async fn update(&self, id: i32, author: NewAuthor) -> AppResult<Author> {
        let updated = self
            .repository
            .authors
            .update(id, &author)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Author updated: id={}", updated.id);
        Ok(updated)
    }

    /// Delete `target_id` unless the author at `id` still has books.
    ///
    /// The book check and the delete are separate statements; a book added in
    /// between is not detected here.
    pub async fn delete(&self, id: i32, target_id: i32) -> AppResult<DeleteOutcome> {
        let (author, books) = self.with_books(id).await?;
        if !books.is_empty() {
            tracing::warn!(
                "Refusing to delete author id={}: {} book(s) still reference it",
                id,
                books.len()
            );
            return Ok(DeleteOutcome::HasBooks { author, books });
        }

        let removed = self.repository.authors.delete(target_id).await?;
        tracing::info!("Author delete: id={} removed={}", target_id, removed);
        Ok(DeleteOutcome::Deleted)
    }
}
