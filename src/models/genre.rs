//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}
