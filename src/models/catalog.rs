use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::product::{NewProduct, Product, ProductError, ProductId};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog contains no products")]
    Empty,

    #[error("Duplicate product id in catalog: {id}")]
    DuplicateProduct { id: ProductId },

    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<NewProduct>,
}

/// The fixed set of purchasable products, built once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(requests: Vec<NewProduct>) -> Result<Self, CatalogError> {
        if requests.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(requests.len());
        let mut products = Vec::with_capacity(requests.len());
        for request in requests {
            if !seen.insert(request.id) {
                return Err(CatalogError::DuplicateProduct { id: request.id });
            }
            products.push(Product::new(request)?);
        }

        debug!("Catalog built with {} products", products.len());
        Ok(Self { products })
    }

    /// The three demo articles the widget starts with.
    pub fn default_catalog() -> Self {
        Self {
            products: vec![
                Product {
                    id: ProductId(1),
                    name: "Article 1".to_string(),
                    price: Decimal::new(2999, 2),
                },
                Product {
                    id: ProductId(2),
                    name: "Article 2".to_string(),
                    price: Decimal::new(1999, 2),
                },
                Product {
                    id: ProductId(3),
                    name: "Article 3".to_string(),
                    price: Decimal::new(3999, 2),
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.products)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!("Loading catalog from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
