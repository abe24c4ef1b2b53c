//! Data models for the Local Library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod message;

use serde::Serialize;
use validator::ValidationErrors;

// Re-export commonly used types
pub use author::{Author, AuthorForm, NewAuthor};
pub use book::{Book, BookDetail, BookListing, BookSummary, BookTitle, CatalogSummary};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceStatus, BookInstanceWithBook, NewBookInstance,
};
pub use genre::Genre;
pub use message::{Message, MessageForm};

/// One failed rule on one form field, shown next to the re-rendered form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Form field name
    pub path: String,
    /// Human readable message
    pub msg: String,
    /// Sanitized value that failed
    pub value: String,
}

impl FieldError {
    pub fn new(path: &str, msg: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            msg: msg.into(),
            value: value.into(),
        }
    }

    /// Flatten `validator` errors into form order. Within a field the
    /// length check is reported before the other rules.
    pub(crate) fn collect(
        errors: &ValidationErrors,
        order: &[&str],
        value_of: impl Fn(&str) -> String,
    ) -> Vec<FieldError> {
        let mut by_field: Vec<(usize, String, Vec<(u8, String)>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let field = field.to_string();
                let position = order.iter().position(|f| *f == field).unwrap_or(order.len());
                let mut messages: Vec<(u8, String)> = errs
                    .iter()
                    .map(|e| {
                        let rank = if e.code == "length" { 0 } else { 1 };
                        let msg = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {}", field));
                        (rank, msg)
                    })
                    .collect();
                messages.sort_by_key(|(rank, _)| *rank);
                (position, field, messages)
            })
            .collect();
        by_field.sort_by_key(|(position, _, _)| *position);

        by_field
            .into_iter()
            .flat_map(|(_, field, messages)| {
                let value = value_of(&field);
                messages
                    .into_iter()
                    .map(move |(_, msg)| FieldError::new(&field, msg, value.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
