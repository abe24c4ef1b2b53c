//! Repository layer for database operations
//!
//! Each entity is reached through a trait so that services can be driven by
//! mocks in tests; the Postgres implementations live next to the traits.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod messages;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use authors::AuthorRepository;
pub use book_instances::BookInstanceRepository;
pub use books::BookRepository;
pub use genres::GenreRepository;
pub use messages::{InMemoryMessageStore, MessageStore};

/// Main repository struct holding one handle per entity
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub book_instances: Arc<dyn BookInstanceRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::PgAuthorRepository::new(pool.clone())),
            books: Arc::new(books::PgBookRepository::new(pool.clone())),
            genres: Arc::new(genres::PgGenreRepository::new(pool.clone())),
            book_instances: Arc::new(book_instances::PgBookInstanceRepository::new(pool)),
        }
    }
}
