//! Book instance (physical copy) model and related types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use validator::{Validate, ValidationError};

use super::{BookTitle, FieldError};
use crate::sanitize::{due_back_iso, optional_iso_date, trim_escape};

/// Lending status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

#[derive(Debug, Error)]
#[error("Unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(BookInstanceStatus::Available),
            "maintenance" => Ok(BookInstanceStatus::Maintenance),
            "loaned" => Ok(BookInstanceStatus::Loaned),
            "reserved" => Ok(BookInstanceStatus::Reserved),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    pub fn url_for(id: i32) -> String {
        format!("/catalog/bookinstance/{}", id)
    }

    /// e.g. "Mar 4, 2024"
    pub fn due_back_formatted(&self) -> String {
        self.due_back
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Book instance with its book resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: BookTitle,
}

/// Validated book instance fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookInstance {
    pub book_id: i32,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

fn book_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<i32>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("reference").with_message("Invalid book".into()))
    }
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status").with_message("Invalid status".into()))
    }
}

/// Book instance form body (create and update)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BookInstanceForm {
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "book_reference")
    )]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = "known_status"))]
    pub status: String,
    #[validate(custom(function = "due_back_iso"))]
    pub due_back: String,
}

impl BookInstanceForm {
    const FIELDS: [&'static str; 4] = ["book", "imprint", "status", "due_back"];

    pub fn sanitized(&self) -> Self {
        Self {
            book: trim_escape(&self.book),
            imprint: trim_escape(&self.imprint),
            status: trim_escape(&self.status),
            due_back: self.due_back.trim().to_string(),
        }
    }

    /// Book id picked in the selection list, if it is one
    pub fn selected_book(&self) -> Option<i32> {
        self.book.parse().ok()
    }

    pub fn into_new_book_instance(
        self,
    ) -> Result<NewBookInstance, (BookInstanceForm, Vec<FieldError>)> {
        let form = self.sanitized();
        let book_id = match (form.validate(), form.selected_book()) {
            (Ok(()), Some(book_id)) => book_id,
            (Ok(()), None) => {
                let error = FieldError::new("book", "Book must be specified", form.book.clone());
                return Err((form, vec![error]));
            }
            (Err(errors), _) => {
                let errors = FieldError::collect(&errors, &Self::FIELDS, |field| form.value_of(field));
                return Err((form, errors));
            }
        };

        Ok(NewBookInstance {
            book_id,
            status: form.status.parse().unwrap_or_default(),
            due_back: optional_iso_date(&form.due_back),
            imprint: form.imprint,
        })
    }

    fn value_of(&self, field: &str) -> String {
        match field {
            "book" => self.book.clone(),
            "imprint" => self.imprint.clone(),
            "status" => self.status.clone(),
            "due_back" => self.due_back.clone(),
            _ => String::new(),
        }
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(book: &str, imprint: &str, status: &str, due_back: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: book.to_string(),
            imprint: imprint.to_string(),
            status: status.to_string(),
            due_back: due_back.to_string(),
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Available".parse::<BookInstanceStatus>().unwrap(), BookInstanceStatus::Available);
        assert_eq!("loaned".parse::<BookInstanceStatus>().unwrap(), BookInstanceStatus::Loaned);
        assert!("Lost".parse::<BookInstanceStatus>().is_err());
        assert_eq!(BookInstanceStatus::Reserved.to_string(), "Reserved");
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_url_and_due_back() {
        let instance = BookInstance {
            id: 5,
            book_id: 2,
            imprint: "Gollancz, 2011".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2024, 3, 4),
        };
        assert_eq!(instance.url(), "/catalog/bookinstance/5");
        assert_eq!(instance.due_back_formatted(), "Mar 4, 2024");
    }

    #[test]
    fn test_valid_form() {
        let new = form(" 3 ", " First Edition ", "Available", "")
            .into_new_book_instance()
            .unwrap();
        assert_eq!(
            new,
            NewBookInstance {
                book_id: 3,
                imprint: "First Edition".to_string(),
                status: BookInstanceStatus::Available,
                due_back: None,
            }
        );
    }

    #[test]
    fn test_blank_status_defaults_to_maintenance() {
        let new = form("3", "Penguin", "", "2030-01-15").into_new_book_instance().unwrap();
        assert_eq!(new.status, BookInstanceStatus::Maintenance);
        assert_eq!(new.due_back, NaiveDate::from_ymd_opt(2030, 1, 15));
    }

    #[test]
    fn test_invalid_form() {
        let (form, errors) = form("", "  ", "Lost", "soon").into_new_book_instance().unwrap_err();
        assert_eq!(form.imprint, "");
        let messages: Vec<_> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Book must be specified", "Imprint must be specified", "Invalid status", "Invalid date"]
        );
    }

    #[test]
    fn test_non_numeric_book_is_rejected() {
        let (form, errors) = form("abc", "Penguin", "", "").into_new_book_instance().unwrap_err();
        assert_eq!(form.selected_book(), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "book");
        assert_eq!(errors[0].msg, "Invalid book");
    }
}
