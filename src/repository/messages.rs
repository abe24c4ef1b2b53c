//! Message board store

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{error::AppResult, models::message::Message};

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Every message, oldest first
    async fn list(&self) -> AppResult<Vec<Message>>;

    async fn add(&self, message: Message) -> AppResult<()>;
}

/// Process-local store. Contents are lost on restart and not shared between
/// server processes.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageStore {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Store pre-filled with the two greeting messages
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(vec![
            Message {
                text: "Hi there!".to_string(),
                user: "Amando".to_string(),
                added: now,
            },
            Message {
                text: "Hello World!".to_string(),
                user: "Charles".to_string(),
                added: now,
            },
        ])
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn list(&self) -> AppResult<Vec<Message>> {
        Ok(self.messages.read().await.clone())
    }

    async fn add(&self, message: Message) -> AppResult<()> {
        self.messages.write().await.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store() {
        let store = InMemoryMessageStore::seeded();
        let messages = store.list().await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].user, "Amando");
        assert_eq!(messages[1].text, "Hello World!");
    }

    #[tokio::test]
    async fn test_add_appends() {
        let store = InMemoryMessageStore::default();
        store
            .add(Message {
                text: "first".to_string(),
                user: "a".to_string(),
                added: Utc::now(),
            })
            .await
            .unwrap();
        store
            .add(Message {
                text: "second".to_string(),
                user: "b".to_string(),
                added: Utc::now(),
            })
            .await
            .unwrap();

        let texts: Vec<_> = store.list().await.unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
