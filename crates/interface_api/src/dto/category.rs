//! Category DTOs

use domain_catalog::Category;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`
///
/// A missing `name` deserializes as empty and fails validation.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required."),
        length(max = 64, message = "Name must be at most 64 characters.")
    )]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryRequest {
    /// Name as sent; only its blankness is checked
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, empty when omitted
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.value(),
            name: category.name,
            description: category.description,
        }
    }
}
