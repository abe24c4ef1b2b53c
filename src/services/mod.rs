//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod catalog;
pub mod messages;

use std::sync::Arc;

use crate::repository::{MessageStore, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub book_instances: book_instances::BookInstancesService,
    pub catalog: catalog::CatalogService,
    pub messages: messages::MessagesService,
}

impl Services {
    /// Create all services with the given repository and message store
    pub fn new(repository: Repository, message_store: Arc<dyn MessageStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
            messages: messages::MessagesService::new(message_store),
        }
    }
}
