//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::{Author, NewAuthor},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// All authors, ordered by family name
    async fn find_all(&self) -> AppResult<Vec<Author>>;

    /// `Ok(None)` when no author has this id
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    async fn create(&self, author: &NewAuthor) -> AppResult<Author>;

    /// Replace every mutable field. `Ok(None)` when no author has this id.
    async fn update(&self, id: i32, author: &NewAuthor) -> AppResult<Option<Author>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: Pool<Postgres>,
}

impl PgAuthorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn find_all(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death FROM authors ORDER BY family_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn create(&self, author: &NewAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, author: &NewAuthor) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $1, family_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
