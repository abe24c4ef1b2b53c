//! Book instances repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceStatus, BookInstanceWithBook, NewBookInstance},
    },
};

const SELECT_WITH_BOOK: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back, b.title AS book_title
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// All copies with their book joined in
    async fn find_all(&self) -> AppResult<Vec<BookInstanceWithBook>>;

    /// `Ok(None)` when no copy has this id
    async fn find_by_id(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>>;

    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;

    async fn create(&self, instance: &NewBookInstance) -> AppResult<BookInstance>;

    /// Replace book, imprint, status and due date. `Ok(None)` when no copy has this id.
    async fn update(&self, id: i32, instance: &NewBookInstance) -> AppResult<Option<BookInstance>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;

    async fn count_with_status(&self, status: BookInstanceStatus) -> AppResult<i64>;
}

#[derive(FromRow)]
struct BookInstanceRow {
    id: i32,
    book_id: i32,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
    book_title: String,
}

impl TryFrom<BookInstanceRow> for BookInstanceWithBook {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookInstanceStatus>()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(BookInstanceWithBook {
            book: BookTitle {
                id: row.book_id,
                title: row.book_title,
            },
            instance: BookInstance {
                id: row.id,
                book_id: row.book_id,
                imprint: row.imprint,
                status,
                due_back: row.due_back,
            },
        })
    }
}

#[derive(Clone)]
pub struct PgBookInstanceRepository {
    pool: Pool<Postgres>,
}

impl PgBookInstanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInstanceRepository for PgBookInstanceRepository {
    async fn find_all(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let query = format!("{} ORDER BY b.title, bi.id", SELECT_WITH_BOOK);
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(BookInstanceWithBook::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>> {
        let query = format!("{} WHERE bi.id = $1", SELECT_WITH_BOOK);
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstanceWithBook::try_from)
            .transpose()
    }

    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, instance: &NewBookInstance) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_with_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
