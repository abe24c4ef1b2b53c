//! Message board service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::message::{Message, MessageForm},
    repository::MessageStore,
};

#[derive(Clone)]
pub struct MessagesService {
    store: Arc<dyn MessageStore>,
}

impl MessagesService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Message>> {
        self.store.list().await
    }

    pub async fn post(&self, form: MessageForm) -> AppResult<Message> {
        let message = Message {
            text: form.message,
            user: form.name,
            added: Utc::now(),
        };
        self.store.add(message.clone()).await?;
        tracing::debug!("Message posted by {}", message.user);
        Ok(message)
    }
}
