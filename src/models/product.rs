use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Highest unit price a catalog may list. Keeps cart totals far below the
/// `Decimal` range.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Identifier of a catalog product, unique within one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Rendered markup carries the id as `data-id`, events hand it back as text
impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(ProductId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    pub id: ProductId,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(custom = "validate_price")]
    pub price: Decimal,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price_negative"));
    }
    if *price > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::new("price_too_high"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error for product {id}: {source}")]
    ValidationError {
        id: ProductId,
        #[source]
        source: validator::ValidationErrors,
    },
}

impl NewProduct {
    pub fn new(id: u32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
        }
    }
}

impl Product {
    pub fn new(request: NewProduct) -> Result<Self, ProductError> {
        request
            .validate()
            .map_err(|source| ProductError::ValidationError {
                id: request.id,
                source,
            })?;

        Ok(Self {
            id: request.id,
            name: request.name.trim().to_string(),
            price: request.price,
        })
    }
}
