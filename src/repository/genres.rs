//! Genres repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::genre::Genre};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Genre>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>>;

    /// Genres attached to a book
    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<Genre>>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct PgGenreRepository {
    pool: Pool<Postgres>,
}

impl PgGenreRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    async fn find_all(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
