use super::money::{self, Money};
use crate::error::EnrollmentError;
use serde::{Deserialize, Serialize};

/// A course offered in the catalog.
///
/// `list_price` is the crossed-out "was" price shown next to `base_price`, the
/// amount actually charged before promotions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "money::deserialize_exact")]
    pub base_price: Money,
    #[serde(deserialize_with = "money::deserialize_exact")]
    pub list_price: Money,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        base_price: Money,
        list_price: Money,
    ) -> Result<Self, EnrollmentError> {
        let course = Self {
            id: id.into(),
            title: title.into(),
            base_price,
            list_price,
        };
        course.validate()?;
        Ok(course)
    }

    /// Checks `list_price >= base_price`. Non-negativity is carried by `Money`.
    pub fn validate(&self) -> Result<(), EnrollmentError> {
        if self.id.trim().is_empty() {
            return Err(EnrollmentError::InvalidInput(
                "course id must not be empty".to_string(),
            ));
        }
        if self.list_price < self.base_price {
            return Err(EnrollmentError::InvalidInput(format!(
                "course {}: list price {} is below base price {}",
                self.id, self.list_price, self.base_price
            )));
        }
        Ok(())
    }
}
