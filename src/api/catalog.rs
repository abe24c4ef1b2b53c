//! Catalog home, book and genre pages (read only)

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::{
    error::AppResult,
    views::{BookDetailPage, BookListPage, GenreDetailPage, GenreListPage, IndexPage, Page},
    AppState,
};

/// Catalog home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let summary = state.services.catalog.summary().await?;
    state.render(Page::Index(IndexPage { summary }))
}

pub async fn book_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.books().await?;
    state.render(Page::BookList(BookListPage { books }))
}

/// Book with its author, genres and copies
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let detail = state.services.catalog.book_detail(id).await?;
    state.render(Page::BookDetail(BookDetailPage { detail }))
}

pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.catalog.genres().await?;
    state.render(Page::GenreList(GenreListPage { genres }))
}

/// Genre and the books tagged with it
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let (genre, books) = state.services.catalog.genre_detail(id).await?;
    state.render(Page::GenreDetail(GenreDetailPage { genre, books }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use mockall::predicate::eq;

    use crate::{
        models::{Author, Book, BookInstanceStatus, BookListing, BookSummary, Genre},
        testing::{get, Mocks},
    };

    fn book() -> Book {
        Book {
            id: 3,
            title: "The Wise Man's Fear".to_string(),
            summary: "Day two".to_string(),
            isbn: "9780756407919".to_string(),
            author_id: 1,
        }
    }

    fn fantasy() -> Genre {
        Genre {
            id: 1,
            name: "Fantasy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_index_counts() {
        let mut mocks = Mocks::new();
        mocks.books.expect_count().returning(|| Ok(3));
        mocks.book_instances.expect_count().returning(|| Ok(10));
        mocks
            .book_instances
            .expect_count_with_status()
            .with(eq(BookInstanceStatus::Available))
            .returning(|_| Ok(4));
        mocks.authors.expect_count().returning(|| Ok(2));
        mocks.genres.expect_count().returning(|| Ok(5));

        let res = get(mocks.into_app(), "/catalog").await;
        assert_eq!(res.status, StatusCode::OK);
        let page = res.page();
        assert_eq!(page["template"], "index");
        let summary = &page["context"]["summary"];
        assert_eq!(summary["book_count"], 3);
        assert_eq!(summary["book_instance_count"], 10);
        assert_eq!(summary["book_instance_available_count"], 4);
        assert_eq!(summary["author_count"], 2);
        assert_eq!(summary["genre_count"], 5);
    }

    #[tokio::test]
    async fn test_book_list() {
        let mut mocks = Mocks::new();
        mocks.books.expect_find_all().returning(|| {
            Ok(vec![BookListing {
                id: 3,
                title: "The Wise Man's Fear".to_string(),
                author_first_name: "Patrick".to_string(),
                author_family_name: "Rothfuss".to_string(),
            }])
        });

        let res = get(mocks.into_app(), "/catalog/books").await;
        let page = res.page();
        assert_eq!(page["template"], "book_list");
        assert_eq!(page["context"]["books"][0]["author_family_name"], "Rothfuss");
    }

    #[tokio::test]
    async fn test_book_detail() {
        let mut mocks = Mocks::new();
        mocks
            .books
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Ok(Some(book())));
        mocks.authors.expect_find_by_id().with(eq(1)).returning(|id| {
            Ok(Some(Author {
                id,
                first_name: "Patrick".to_string(),
                family_name: "Rothfuss".to_string(),
                date_of_birth: None,
                date_of_death: None,
            }))
        });
        mocks
            .genres
            .expect_find_by_book()
            .returning(|_| Ok(vec![fantasy()]));
        mocks
            .book_instances
            .expect_find_by_book()
            .returning(|_| Ok(vec![]));

        let res = get(mocks.into_app(), "/catalog/book/3").await;
        assert_eq!(res.status, StatusCode::OK);
        let page = res.page();
        assert_eq!(page["template"], "book_detail");
        assert_eq!(page["context"]["detail"]["author"]["family_name"], "Rothfuss");
        assert_eq!(page["context"]["detail"]["genres"][0]["name"], "Fantasy");
    }

    #[tokio::test]
    async fn test_book_detail_missing_is_404() {
        let mut mocks = Mocks::new();
        mocks.books.expect_find_by_id().returning(|_| Ok(None));

        let res = get(mocks.into_app(), "/catalog/book/3").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_genre_pages() {
        let mut mocks = Mocks::new();
        mocks.genres.expect_find_all().returning(|| Ok(vec![fantasy()]));
        mocks
            .genres
            .expect_find_by_id()
            .returning(|id| Ok((id == 1).then(fantasy)));
        mocks.books.expect_find_by_genre().returning(|_| {
            Ok(vec![BookSummary {
                id: 3,
                title: "The Wise Man's Fear".to_string(),
                summary: "Day two".to_string(),
            }])
        });
        let app = mocks.into_app();

        let page = get(app.clone(), "/catalog/genres").await.page();
        assert_eq!(page["template"], "genre_list");
        assert_eq!(page["context"]["genres"][0]["name"], "Fantasy");

        let page = get(app.clone(), "/catalog/genre/1").await.page();
        assert_eq!(page["template"], "genre_detail");
        assert_eq!(page["context"]["books"][0]["id"], 3);

        let res = get(app, "/catalog/genre/2").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
