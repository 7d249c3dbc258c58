use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainResult, Entity, FieldErrors};

use crate::text::check_name;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// Create / full-update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate and normalize (trimmed name).
    pub fn validated(self) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        let name = check_name("nombre", &self.name, &mut errors);
        errors.into_result()?;
        Ok(Self { name })
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category { id, name: self.name }
    }
}

/// Partial-update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

impl CategoryPatch {
    /// Merge onto an existing category, producing a validated full payload.
    pub fn merge(self, current: &Category) -> DomainResult<NewCategory> {
        NewCategory {
            name: self.name.unwrap_or_else(|| current.name.clone()),
        }
        .validated()
    }
}
