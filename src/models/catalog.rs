//! Records of the plain CRUD catalog (`/books`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogBook {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Create catalog entry request; `id` is assigned when omitted
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogBook {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
}

/// Partial update; only the fields present are merged into the record
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCatalogBook {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl CatalogBook {
    /// Shallow merge of `update` into this record
    pub fn merge(&mut self, update: UpdateCatalogBook) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
    }
}
