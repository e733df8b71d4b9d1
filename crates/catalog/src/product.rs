use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

use crate::category::Category;

/// Price in the smallest currency unit (e.g. pence).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Customer rating on a 0–5 scale.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    pub const MAX: f32 = 5.0;

    pub fn new(value: f32) -> DomainResult<Self> {
        let rating = Self(value);
        rating.validate()?;
        Ok(rating)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Total order over ratings (validated ratings are never NaN).
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl ValueObject for Rating {
    fn validate(&self) -> DomainResult<()> {
        if !self.0.is_finite() || self.0 < 0.0 || self.0 > Self::MAX {
            return Err(DomainError::validation(format!(
                "rating must be between 0 and {}, got {}",
                Self::MAX,
                self.0
            )));
        }
        Ok(())
    }
}

impl TryFrom<f32> for Rating {
    type Error = DomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Product read model as served to the storefront.
///
/// The category is carried joined (not as a bare id) so sorting and filtering
/// by category name need no extra lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: Option<String>,
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub price: Price,
    pub rating: Option<Rating>,
    pub has_sizes: Option<bool>,
    pub image_url: Option<String>,
    pub image: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }

        Ok(Self {
            id: ProductId::new(),
            sku: None,
            name,
            description: description.into(),
            category: None,
            price,
            rating: None,
            has_sizes: None,
            image_url: None,
            image: None,
        })
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_image(mut self, image_url: Option<String>, image: Option<String>) -> Self {
        self.image_url = image_url;
        self.image = image;
        self
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Case-insensitive substring match against name OR description.
    ///
    /// `needle_lower` must already be lower-cased.
    pub fn matches_term(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_displays_major_and_minor_units() {
        assert_eq!(Price::from_minor_units(1999).to_string(), "19.99");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Price::from_minor_units(12000).to_string(), "120.00");
    }

    #[test]
    fn rating_rejects_out_of_range_and_nan() {
        assert!(Rating::new(4.5).is_ok());
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(5.0).is_ok());
        assert!(matches!(Rating::new(-0.1), Err(DomainError::Validation(_))));
        assert!(matches!(Rating::new(5.01), Err(DomainError::Validation(_))));
        assert!(matches!(Rating::new(f32::NAN), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rating_deserialization_is_validated() {
        let ok: Rating = serde_json::from_str("3.5").unwrap();
        assert_eq!(ok.value(), 3.5);
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn product_rejects_blank_name() {
        let err = Product::new("  ", "desc", Price::from_minor_units(100)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn matches_term_hits_name_or_description() {
        let shirt = Product::new("Blue Shirt", "warm", Price::from_minor_units(100)).unwrap();
        let hat = Product::new("Hat", "has a shirt logo", Price::from_minor_units(100)).unwrap();
        let pants = Product::new("Pants", "cotton", Price::from_minor_units(100)).unwrap();

        assert!(shirt.matches_term("shirt"));
        assert!(hat.matches_term("shirt"));
        assert!(!pants.matches_term("shirt"));
    }

    #[test]
    fn same_identity_ignores_other_fields() {
        let a = Product::new("A", "", Price::from_minor_units(1)).unwrap();
        let mut b = a.clone();
        b.name = "renamed".to_string();
        assert!(a.same_identity(&b));
    }
}
