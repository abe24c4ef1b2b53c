//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::FieldError;
use crate::sanitize::{
    date_of_birth_iso, date_of_death_iso, family_name_alphanumeric, first_name_alphanumeric,
    optional_iso_date, trim_escape,
};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "family_name, first_name", or an empty string when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    pub fn url_for(id: i32) -> String {
        format!("/catalog/author/{}", id)
    }

    pub fn lifespan(&self) -> String {
        let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        match (self.date_of_birth, self.date_of_death) {
            (None, None) => String::new(),
            (birth, death) => format!("{} - {}", fmt(birth), fmt(death)),
        }
    }
}

/// Validated author fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author form body (create and update)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First Name must be specified"),
        custom(function = "first_name_alphanumeric")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family Name must be specified"),
        custom(function = "family_name_alphanumeric")
    )]
    pub family_name: String,
    #[validate(custom(function = "date_of_birth_iso"))]
    pub date_of_birth: String,
    #[validate(custom(function = "date_of_death_iso"))]
    pub date_of_death: String,
}

impl AuthorForm {
    const FIELDS: [&'static str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];

    /// Trimmed and escaped copy of the submitted values
    pub fn sanitized(&self) -> Self {
        Self {
            first_name: trim_escape(&self.first_name),
            family_name: trim_escape(&self.family_name),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    /// Sanitize and validate. On failure the sanitized form comes back with
    /// the field errors so it can be shown again.
    pub fn into_new_author(self) -> Result<NewAuthor, (AuthorForm, Vec<FieldError>)> {
        let form = self.sanitized();
        if let Err(errors) = form.validate() {
            let errors = FieldError::collect(&errors, &Self::FIELDS, |field| form.value_of(field));
            return Err((form, errors));
        }

        Ok(NewAuthor {
            date_of_birth: optional_iso_date(&form.date_of_birth),
            date_of_death: optional_iso_date(&form.date_of_death),
            first_name: form.first_name,
            family_name: form.family_name,
        })
    }

    fn value_of(&self, field: &str) -> String {
        match field {
            "first_name" => self.first_name.clone(),
            "family_name" => self.family_name.clone(),
            "date_of_birth" => self.date_of_birth.clone(),
            "date_of_death" => self.date_of_death.clone(),
            _ => String::new(),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: fmt(author.date_of_birth),
            date_of_death: fmt(author.date_of_death),
        }
    }
}
