use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, DomainError, DomainResult, Entity};

/// Product category. `name` is unique and is the filter/join key used in
/// browse URLs (`?category=jeans,shirts`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub friendly_name: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name must not be empty"));
        }
        if name.contains(',') {
            return Err(DomainError::validation(format!(
                "category name must not contain ',': {name}"
            )));
        }

        Ok(Self {
            id: CategoryId::new(),
            name,
            friendly_name: None,
        })
    }

    pub fn with_friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = Some(friendly_name.into());
        self
    }

    /// Label shown to shoppers; falls back to the key name.
    pub fn display_name(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.name)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
