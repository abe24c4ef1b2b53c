//! Book instance (copy) management service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceWithBook, NewBookInstance},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        self.repository.book_instances.find_all().await
    }

    /// Copy with its book, failing with NotFound when absent
    pub async fn get(&self, id: i32) -> AppResult<BookInstanceWithBook> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book instance not found".to_string()))
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>> {
        self.repository.book_instances.find_by_id(id).await
    }

    /// Choices for the book selection list, by title
    pub async fn book_choices(&self) -> AppResult<Vec<BookTitle>> {
        self.repository.books.find_titles().await
    }

    /// Everything the update form needs: the book choices and the copy itself
    pub async fn edit(&self, id: i32) -> AppResult<(Vec<BookTitle>, BookInstanceWithBook)> {
        let (books, instance) = tokio::try_join!(
            self.repository.books.find_titles(),
            self.repository.book_instances.find_by_id(id),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book instance not found".to_string()))?;
        Ok((books, instance))
    }

    pub async fn create(&self, instance: NewBookInstance) -> AppResult<BookInstance> {
        let created = self.repository.book_instances.create(&instance).await?;
        tracing::info!(
            "Book instance created: id={} book_id={} status={}",
            created.id,
            created.book_id,
            created.status
        );
        Ok(created)
    }

    /// Replace the copy's fields, failing with NotFound when absent
    pub async fn update(&self, id: i32, instance: NewBookInstance) -> AppResult<BookInstance> {
        let updated = self
            .repository
            .book_instances
            .update(id, &instance)
            .await?
            .ok_or_else(|| AppError::NotFound("Book instance not found".to_string()))?;
        tracing::info!("Book instance updated: id={}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.repository.book_instances.delete(id).await?;
        tracing::info!("Book instance delete: id={} removed={}", id, removed);
        Ok(())
    }
}
